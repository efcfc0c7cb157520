// SSH模块入口
pub mod client;
pub mod observer;
pub mod session;
pub mod transport;

pub use client::{Ssh2Connector, SshClient};
pub use observer::{LogObserver, SessionObserver};
pub use session::SftpSession;
pub use transport::{Connector, RemoteFs};
