//! Timing decorator logging start, completion and elapsed time of every call

use std::fmt::{self, Display};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::domain::interception::{CallOutput, InterceptHook, InterceptedCall, Interceptable};
use crate::domain::logging::{LogEntry, LogSink};
use crate::domain::DomainError;
use crate::infrastructure::container::{Decorator, DecoratorFactory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Error,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

fn done_message(outcome: Outcome, method: &str, elapsed: Duration) -> String {
    format!(
        "[{}] Done executing '{}'! ElapsedTime: {:?}",
        outcome, method, elapsed
    )
}

fn record_outcome<R, E: Display>(
    sink: &dyn LogSink,
    method: &str,
    elapsed: Duration,
    result: &Result<R, E>,
) {
    let entry = match result {
        Ok(_) => LogEntry::info(done_message(Outcome::Success, method, elapsed)),
        Err(error) => {
            LogEntry::error(done_message(Outcome::Error, method, elapsed)).with_error(error)
        }
    };
    sink.log(entry.with_method(method).with_elapsed(elapsed));
}

/// Measures every call of the wrapped service and reports it to a [`LogSink`]
///
/// Each call logs `Invoking '<method>' now!` before the target runs. Once the result
/// is known it logs either an info entry tagged `[SUCCESS]` or a single error entry
/// tagged `[ERROR]` carrying the target's error. For calls returning a future the
/// clock starts before the target is invoked and stops when that future resolves.
#[derive(Debug, Clone)]
pub struct TimingDecorator {
    sink: Arc<dyn LogSink>,
}

impl TimingDecorator {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Wraps `decorated` in a timing proxy
    pub fn create<S: Interceptable + ?Sized>(
        decorated: Arc<S>,
        sink: Arc<dyn LogSink>,
    ) -> Result<Arc<S>, DomainError> {
        Ok(S::intercept_with(decorated, Self::new(sink)))
    }

    fn started(&self, method: &str) {
        self.sink
            .log(LogEntry::info(format!("Invoking '{}' now!", method)).with_method(method));
    }
}

impl InterceptHook for TimingDecorator {
    fn intercept<R, E, F>(&self, call: &InterceptedCall, proceed: F) -> Result<R, E>
    where
        R: CallOutput,
        E: Display,
        F: FnOnce() -> Result<R, E>,
    {
        let method = call.qualified_name();
        self.started(&method);

        let timer = Instant::now();
        let result = proceed();
        record_outcome(self.sink.as_ref(), &method, timer.elapsed(), &result);

        result
    }

    fn intercept_async<'a, R, E, F, Fut>(
        &'a self,
        call: InterceptedCall,
        proceed: F,
    ) -> BoxFuture<'a, Result<R, E>>
    where
        R: CallOutput,
        E: Display + Send + 'a,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>> + Send + 'a,
    {
        let method = call.qualified_name();
        self.started(&method);

        let timer = Instant::now();
        let sink = Arc::clone(&self.sink);
        proceed()
            .inspect(move |result| {
                record_outcome(sink.as_ref(), &method, timer.elapsed(), result)
            })
            .boxed()
    }
}

impl<S: Interceptable + ?Sized> Decorator<S> for TimingDecorator {
    fn factories() -> Vec<DecoratorFactory> {
        vec![DecoratorFactory::new::<S, (Arc<S>, Arc<dyn LogSink>), _>(
            Self::create::<S>,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::logging::mock::RecordingLogSink;
    use crate::domain::logging::LogLevel;
    use crate::domain::number::NumberService;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        calls: AtomicUsize,
    }

    impl NumberService for Fixed {
        fn n_fibonacci(&self, n: u32) -> Result<u64, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(u64::from(n) * 10)
        }

        fn n_prime(&self, _n: u32) -> Result<u64, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::overflow("prime"))
        }
    }

    fn timed(sink: &Arc<RecordingLogSink>) -> (Arc<Fixed>, Arc<dyn NumberService>) {
        let target = Arc::new(Fixed {
            calls: AtomicUsize::new(0),
        });
        let decorated =
            TimingDecorator::create::<dyn NumberService>(target.clone(), sink.clone()).unwrap();
        (target, decorated)
    }

    #[test]
    fn test_success_logs_start_and_done() {
        let sink = Arc::new(RecordingLogSink::new());
        let (target, service) = timed(&sink);

        assert_eq!(service.n_fibonacci(4).unwrap(), 40);
        assert_eq!(target.calls.load(Ordering::SeqCst), 1);

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "Invoking 'NumberService.n_fibonacci' now!");
        assert_eq!(entries[0].level, LogLevel::Info);
        assert!(entries[1]
            .message
            .starts_with("[SUCCESS] Done executing 'NumberService.n_fibonacci'! ElapsedTime: "));
        assert!(entries[1].elapsed.is_some());
        assert!(sink.entries_at(LogLevel::Error).is_empty());
    }

    #[test]
    fn test_failure_logs_single_error_and_returns_it() {
        let sink = Arc::new(RecordingLogSink::new());
        let (_, service) = timed(&sink);

        let error = service.n_prime(3).unwrap_err();
        assert_eq!(error, DomainError::overflow("prime"));

        let errors = sink.entries_at(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("[ERROR] Done executing 'NumberService.n_prime'!"));
        assert_eq!(errors[0].error.as_deref(), Some(error.to_string().as_str()));
        assert_eq!(sink.entries_at(LogLevel::Info).len(), 1);
    }

    #[async_trait]
    trait Fetcher: Send + Sync {
        async fn fetch(&self, id: u32) -> Result<String, DomainError>;
    }

    struct SlowFetcher;

    #[async_trait]
    impl Fetcher for SlowFetcher {
        async fn fetch(&self, id: u32) -> Result<String, DomainError> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            if id == 0 {
                return Err(DomainError::not_found("id 0"));
            }
            Ok(format!("item-{}", id))
        }
    }

    #[async_trait]
    impl<H: InterceptHook> Fetcher for crate::domain::interception::DispatchProxy<dyn Fetcher, H> {
        async fn fetch(&self, id: u32) -> Result<String, DomainError> {
            let call = InterceptedCall::new("Fetcher", "fetch").with_arg(id);
            self.dispatch_async(call, move |target| target.fetch(id)).await
        }
    }

    impl Interceptable for dyn Fetcher {
        fn intercept_with<H: InterceptHook>(target: Arc<Self>, hook: H) -> Arc<Self> {
            Arc::new(crate::domain::interception::DispatchProxy::new(target, hook))
        }
    }

    #[tokio::test]
    async fn test_async_result_is_timed_on_completion() {
        let sink = Arc::new(RecordingLogSink::new());
        let fetcher =
            TimingDecorator::create::<dyn Fetcher>(Arc::new(SlowFetcher), sink.clone()).unwrap();

        let pending = fetcher.fetch(7);
        let value = pending.await.unwrap();
        assert_eq!(value, "item-7");

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].message.starts_with("[SUCCESS]"));
        assert!(entries[1].elapsed.unwrap() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_async_failure_logs_error_once() {
        let sink = Arc::new(RecordingLogSink::new());
        let fetcher =
            TimingDecorator::create::<dyn Fetcher>(Arc::new(SlowFetcher), sink.clone()).unwrap();

        let error = fetcher.fetch(0).await.unwrap_err();
        assert!(matches!(error, DomainError::NotFound { .. }));

        let errors = sink.entries_at(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("[ERROR] Done executing 'Fetcher.fetch'!"));
    }

    trait Warehouse: Send + Sync {
        /// Does its bookkeeping before handing back the pending count
        fn stock(&self, item: u32) -> BoxFuture<'_, Result<u64, DomainError>>;
    }

    struct SlowBookkeeping;

    impl Warehouse for SlowBookkeeping {
        fn stock(&self, item: u32) -> BoxFuture<'_, Result<u64, DomainError>> {
            std::thread::sleep(Duration::from_millis(20));
            futures::future::ready(Ok(u64::from(item) * 2)).boxed()
        }
    }

    impl<H: InterceptHook> Warehouse for crate::domain::interception::DispatchProxy<dyn Warehouse, H> {
        fn stock(&self, item: u32) -> BoxFuture<'_, Result<u64, DomainError>> {
            let call = InterceptedCall::new("Warehouse", "stock").with_arg(item);
            self.dispatch_async(call, move |target| target.stock(item))
        }
    }

    impl Interceptable for dyn Warehouse {
        fn intercept_with<H: InterceptHook>(target: Arc<Self>, hook: H) -> Arc<Self> {
            Arc::new(crate::domain::interception::DispatchProxy::new(target, hook))
        }
    }

    #[tokio::test]
    async fn test_async_timer_covers_work_before_the_future() {
        let sink = Arc::new(RecordingLogSink::new());
        let warehouse =
            TimingDecorator::create::<dyn Warehouse>(Arc::new(SlowBookkeeping), sink.clone())
                .unwrap();

        assert_eq!(warehouse.stock(4).await.unwrap(), 8);

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].message.starts_with("Invoking"));
        assert!(entries[1].elapsed.unwrap() >= Duration::from_millis(20));
    }

    trait Registry: Send + Sync {
        fn open(&self, name: &str) -> Result<Arc<dyn NumberService>, DomainError>;
    }

    struct FixedRegistry;

    impl Registry for FixedRegistry {
        fn open(&self, name: &str) -> Result<Arc<dyn NumberService>, DomainError> {
            if name.is_empty() {
                return Err(DomainError::not_found("unnamed service"));
            }
            Ok(Arc::new(Fixed {
                calls: AtomicUsize::new(0),
            }))
        }
    }

    impl<H: InterceptHook> Registry for crate::domain::interception::DispatchProxy<dyn Registry, H> {
        fn open(&self, name: &str) -> Result<Arc<dyn NumberService>, DomainError> {
            let call = InterceptedCall::new("Registry", "open").with_arg(name);
            self.dispatch(call, |target| target.open(name))
        }
    }

    impl Interceptable for dyn Registry {
        fn intercept_with<H: InterceptHook>(target: Arc<Self>, hook: H) -> Arc<Self> {
            Arc::new(crate::domain::interception::DispatchProxy::new(target, hook))
        }
    }

    #[test]
    fn test_times_methods_returning_services() {
        let sink = Arc::new(RecordingLogSink::new());
        let registry =
            TimingDecorator::create::<dyn Registry>(Arc::new(FixedRegistry), sink.clone()).unwrap();

        let opened = registry.open("fixed").unwrap();
        assert_eq!(opened.n_fibonacci(2).unwrap(), 20);
        assert!(registry.open("").is_err());

        let entries = sink.entries();
        assert_eq!(entries.len(), 4);
        assert!(entries[1].message.starts_with("[SUCCESS] Done executing 'Registry.open'!"));
        assert!(entries[3].message.starts_with("[ERROR] Done executing 'Registry.open'!"));
    }

    #[test]
    fn test_decorator_exposes_one_factory() {
        let factories = <TimingDecorator as Decorator<dyn NumberService>>::factories();
        assert_eq!(factories.len(), 1);
        assert_eq!(
            factories[0].parameters()[1],
            crate::infrastructure::container::Parameter::of::<dyn LogSink>()
        );
    }
}
