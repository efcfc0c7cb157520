// 日志消息
pub const MISSING_ATTRIBUTES: &str = "The connection configuration is missing required keys";
pub const NO_CONNECTION: &str = "There is no connection to the SFTP server";
pub const CLOSE_CONNECTION: &str = "Connection to the SFTP server closed";

pub fn established_connection(host: &str) -> String {
    format!("Connection established to SFTP server {}", host)
}

pub fn changed_path(path: &str) -> String {
    format!("Changed remote working directory to {}", path)
}

pub fn uploaded_file(remote_name: &str) -> String {
    format!("Uploaded file {}", remote_name)
}

pub fn downloaded_file(local_name: &str) -> String {
    format!("Downloaded file {}", local_name)
}

/// Renders a key list the way it appears in the missing-keys log line.
pub fn key_list(keys: &[&str]) -> String {
    format!("[{}]", keys.join(", "))
}
