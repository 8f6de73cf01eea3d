mod dispatch;

pub use self::dispatch::DispatchService;
