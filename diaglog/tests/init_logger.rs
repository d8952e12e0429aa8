//! Installing the global subscriber; kept in its own test binary because
//! the subscriber is process-wide.

use diaglog::{init_logger, Ctx, ErrType, Error, KvParam, LogEncoding, LogLevel, LoggerConfig};

#[test]
fn test_init_logger_once() {
    let cfg = LoggerConfig {
        level: LogLevel::Debug,
        encoding: LogEncoding::Json,
    };

    let logger = init_logger(&cfg).unwrap();
    let ctx = logger.ctx_with_params(&Ctx::background(), [KvParam::string("suite", "init")]);
    logger.info(&ctx, "installed", &[KvParam::bool("json", true)]);
    logger.error(&ctx, &Error::from_msg("boom").with_type("demo"), &[]);
    logger.flush();

    let err = init_logger(&cfg).unwrap_err();
    assert!(err.is_of_type(&ErrType::LOGGER_INIT));
    assert!(err.to_string().starts_with("install global subscriber: "));
}
