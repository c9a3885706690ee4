//! Overlay session - scoped resources released together on teardown
//!
//! A session owns the render loop, the camera stream and the detector. They
//! are released exactly once, newest first, whether teardown is explicit or
//! happens through `Drop` on an error path. Anything created outside the
//! session, such as the GPU surface, outlives it, so a restarted session
//! draws to the same surface.

/// Something the session must give back when it ends
pub trait ScopedResource {
    fn name(&self) -> &'static str;

    /// Free the resource. Called at most once by `SessionGuard`.
    fn release(&mut self);
}

#[derive(Default)]
pub struct SessionGuard {
    resources: Vec<Box<dyn ScopedResource>>,
    released: bool,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a resource. Acquiring after release frees it at once.
    pub fn acquire(&mut self, mut resource: Box<dyn ScopedResource>) {
        if self.released {
            log::warn!("Session already closed; releasing {} immediately", resource.name());
            resource.release();
            return;
        }
        log::debug!("Session acquired {}", resource.name());
        self.resources.push(resource);
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Release everything. Later calls are no-ops.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        while let Some(mut resource) = self.resources.pop() {
            log::debug!("Session releasing {}", resource.name());
            resource.release();
        }
        log::info!("Overlay session closed");
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TrackedResource {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl ScopedResource for TrackedResource {
        fn name(&self) -> &'static str {
            self.name
        }

        fn release(&mut self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn tracked(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Box<dyn ScopedResource> {
        Box::new(TrackedResource { name, log: Rc::clone(log) })
    }

    #[test]
    fn test_release_reverse_order_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut guard = SessionGuard::new();
        guard.acquire(tracked("render_loop", &log));
        guard.acquire(tracked("camera", &log));
        guard.acquire(tracked("detector", &log));

        assert_eq!(guard.len(), 3);

        guard.release();
        assert!(guard.is_released());
        assert!(guard.is_empty());
        guard.release();
        drop(guard);

        assert_eq!(*log.borrow(), vec!["detector", "camera", "render_loop"]);
    }

    #[test]
    fn test_drop_releases() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut guard = SessionGuard::new();
            guard.acquire(tracked("camera", &log));
        }
        assert_eq!(*log.borrow(), vec!["camera"]);
    }

    #[test]
    fn test_acquire_after_release_frees_immediately() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut guard = SessionGuard::new();
        guard.release();
        guard.acquire(tracked("late", &log));
        assert!(guard.is_empty());
        assert_eq!(*log.borrow(), vec!["late"]);
    }

    #[test]
    fn test_restart_releases_only_previous_session() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut current = Some(SessionGuard::new());
        if let Some(guard) = current.as_mut() {
            guard.acquire(tracked("camera_1", &log));
            guard.acquire(tracked("detector_1", &log));
        }

        // Restart: the old session is torn down before the new one takes over
        if let Some(mut old) = current.take() {
            old.release();
        }
        let mut next = SessionGuard::new();
        next.acquire(tracked("camera_2", &log));
        next.acquire(tracked("detector_2", &log));

        assert_eq!(*log.borrow(), vec!["detector_1", "camera_1"]);
        assert_eq!(next.len(), 2);
        assert!(!next.is_released());

        drop(next);
        assert_eq!(log.borrow().len(), 4);
    }
}
