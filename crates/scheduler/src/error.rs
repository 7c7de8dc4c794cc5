// error.rs
// 定义调度器通用的错误类型（无效配置、IO、配置解析）和Result类型。
use std::io;
use thiserror::Error;

/// 调度器通用错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// 配置非法，例如工作节点数为0，或对单个节点计算负载方差
    #[error("无效配置: {0}")]
    InvalidConfiguration(String),
    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] io::Error),
    /// 配置文件解析错误
    #[error("配置错误: {0}")]
    ConfigError(String),
}

/// 通用结果类型
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfiguration("工作节点数必须 >= 1".to_string());
        assert_eq!(err.to_string(), "无效配置: 工作节点数必须 >= 1");

        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
