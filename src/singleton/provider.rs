use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

use crate::config::SingletonConfig;
use crate::error::{AppError, AppResult};
use crate::events::{ConsoleSink, Event, EventSink};
use crate::singleton::Singleton;
use crate::sync::{CellState, GuardedCell};

type Constructor = dyn Fn(Arc<dyn EventSink>) -> AppResult<Singleton> + Send + Sync;

static GLOBAL: OnceLock<Arc<SingletonProvider>> = OnceLock::new();

pub struct SingletonProvider {
    cell: GuardedCell<Singleton>,
    sink: Arc<dyn EventSink>,
    constructor: Box<Constructor>,
    construction_delay: Duration,
}

impl SingletonProvider {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self::with_constructor(sink, |sink| Ok(Singleton::new(sink)))
    }

    pub fn with_constructor<F>(sink: Arc<dyn EventSink>, constructor: F) -> Self
    where
        F: Fn(Arc<dyn EventSink>) -> AppResult<Singleton> + Send + Sync + 'static,
    {
        Self {
            cell: GuardedCell::new(),
            sink,
            constructor: Box::new(constructor),
            construction_delay: Duration::ZERO,
        }
    }

    pub fn with_construction_delay(mut self, delay: Duration) -> Self {
        self.construction_delay = delay;
        self
    }

    pub fn from_config(sink: Arc<dyn EventSink>, config: &SingletonConfig) -> Self {
        Self::new(sink).with_construction_delay(config.construction_delay())
    }

    pub fn global(config: &SingletonConfig) -> Arc<SingletonProvider> {
        Arc::clone(
            GLOBAL.get_or_init(|| Arc::new(Self::from_config(Arc::new(ConsoleSink), config))),
        )
    }

    pub fn sink(&self) -> Arc<dyn EventSink> {
        Arc::clone(&self.sink)
    }

    pub fn state(&self) -> CellState {
        self.cell.state()
    }

    pub fn peek(&self) -> Option<Arc<Singleton>> {
        self.cell.get()
    }

    pub fn get_instance(&self) -> AppResult<Arc<Singleton>> {
        self.cell.get_or_try_init(|| self.construct())
    }

    fn construct(&self) -> AppResult<Singleton> {
        tracing::debug!("singleton not yet published; constructing");
        if !self.construction_delay.is_zero() {
            thread::sleep(self.construction_delay);
        }

        let instance = (self.constructor)(Arc::clone(&self.sink)).map_err(|error| match error {
            AppError::Construction(_) => error,
            other => AppError::Construction(other.to_string()),
        })?;

        tracing::info!(instance_id = %instance.instance_id(), "singleton instance created");
        self.sink.emit(Event::InstanceCreated {
            instance_id: instance.instance_id(),
        });
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::SingletonProvider;
    use crate::config::SingletonConfig;
    use crate::error::AppError;
    use crate::events::{Event, RecordingSink};
    use crate::singleton::Singleton;
    use crate::sync::CellState;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn created_count(sink: &RecordingSink) -> usize {
        sink.count(|event| matches!(event, Event::InstanceCreated { .. }))
    }

    #[test]
    fn repeated_calls_return_the_same_instance() {
        let sink = Arc::new(RecordingSink::new());
        let provider = SingletonProvider::new(sink.clone());
        assert_eq!(provider.state(), CellState::Uninit);

        let first = provider.get_instance().expect("first instance");
        let second = provider.get_instance().expect("second instance");

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &provider.peek().expect("published")));
        assert_eq!(provider.state(), CellState::Init);
        assert_eq!(created_count(&sink), 1);
        assert_eq!(
            sink.events(),
            vec![Event::InstanceCreated {
                instance_id: first.instance_id()
            }]
        );
    }

    #[test]
    fn separate_providers_hold_separate_instances() {
        let sink = Arc::new(RecordingSink::new());
        let left = SingletonProvider::new(sink.clone());
        let right = SingletonProvider::new(sink.clone());

        let a = left.get_instance().expect("left");
        let b = right.get_instance().expect("right");

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(created_count(&sink), 2);
    }

    #[test]
    fn construction_failure_is_reported_and_retried_later() {
        let sink = Arc::new(RecordingSink::new());
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_in_ctor = attempts.clone();
        let provider = SingletonProvider::with_constructor(sink.clone(), move |sink| {
            if attempts_in_ctor.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::Construction("backing resource unavailable".to_owned()))
            } else {
                Ok(Singleton::new(sink))
            }
        });

        let error = provider.get_instance().expect_err("first attempt fails");
        assert!(
            matches!(error, AppError::Construction(ref message) if message.contains("unavailable"))
        );
        assert_eq!(provider.state(), CellState::Uninit);
        assert_eq!(created_count(&sink), 0);

        provider.get_instance().expect("second attempt succeeds");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert_eq!(created_count(&sink), 1);
    }

    #[test]
    fn foreign_constructor_errors_become_construction_errors() {
        let sink = Arc::new(RecordingSink::new());
        let provider = SingletonProvider::with_constructor(sink, |_| {
            Err(AppError::Io(std::io::Error::other("no device")))
        });

        let error = provider.get_instance().expect_err("must fail");
        assert!(matches!(error, AppError::Construction(ref message) if message.contains("no device")));
    }

    #[test]
    fn from_config_applies_construction_delay() {
        let sink = Arc::new(RecordingSink::new());
        let config = SingletonConfig {
            construction_delay_ms: 5,
        };
        let provider = SingletonProvider::from_config(sink, &config);
        assert_eq!(provider.construction_delay, Duration::from_millis(5));
    }

    #[test]
    fn global_provider_is_shared() {
        let config = SingletonConfig::default();
        let first = SingletonProvider::global(&config);
        let second = SingletonProvider::global(&config);
        assert!(Arc::ptr_eq(&first, &second));
    }
}
