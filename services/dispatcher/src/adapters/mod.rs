pub mod mongo;
pub mod smtp;

pub use mongo::MongoContentRepository;
pub use smtp::SmtpMailer;
