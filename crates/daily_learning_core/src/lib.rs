pub mod compose;
pub mod dispatcher;
pub mod domain;
pub mod notifier;
pub mod ports;

pub use dispatcher::DailyDispatcher;
pub use domain::{
    DailyLearningRecord, DeliveryOutcome, DispatchReport, EmailMessage, EventKind,
    FollowupQuestion, ReportDetail, TodayContent,
};
pub use notifier::Notifier;
pub use ports::{Clock, ContentRepository, MailTransport, PortError, PortResult, SystemClock};
