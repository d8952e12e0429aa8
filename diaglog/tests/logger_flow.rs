//! End-to-end: context attached on the way down, error enriched on the way
//! up, one record rendered at the top.

use diaglog::{
    Ctx, ErrType, Error, FieldValue, KvParam, Logger, RecordingSink, Renderable, ResultExt,
    Severity,
};
use std::sync::Arc;

const STORAGE: ErrType = ErrType::from_static("storage");

fn write_block(ctx: &Ctx, block: i64) -> Result<(), Error> {
    let ctx = ctx.attach_params([KvParam::int("block", block)]);
    Err::<(), _>(std::io::Error::other("disk full"))
        .classify(STORAGE)
        .with_ctx(&ctx)
        .with_params([KvParam::int("retries", 3)])
}

fn save_document(ctx: &Ctx, doc: &str) -> Result<(), Error> {
    let ctx = ctx.attach_params([KvParam::string("doc", doc.to_owned())]);
    write_block(&ctx, 42).map_err(|e| e.with_msg_wrap("save failed"))
}

fn setup() -> (Logger, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    (Logger::from_arc(sink.clone()), sink)
}

#[test]
fn test_error_flow() {
    let (logger, sink) = setup();
    let ctx = logger.ctx_with_params(&Ctx::background(), [KvParam::string("request_id", "r-9")]);

    let err = save_document(&ctx, "notes.md").unwrap_err();
    logger.error(&ctx, &err, &[KvParam::string("doc", "override.md")]);

    let records = sink.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.severity, Severity::Error);
    assert_eq!(record.message, "save failed: disk full");

    let keys: Vec<&str> = record.fields.iter().map(|f| f.key.as_str()).collect();
    // explicit first, then the error's params (retries, then the ctx captured
    // at the failure site), then err_type; the logging ctx adds nothing new
    assert_eq!(keys, ["doc", "retries", "request_id", "block", "err_type"]);
    assert_eq!(
        record.field("doc").map(|f| &f.value),
        Some(&FieldValue::String("override.md".into()))
    );
    assert_eq!(
        record.field("err_type").map(|f| &f.value),
        Some(&FieldValue::String("storage".into()))
    );
}

#[test]
fn test_dedup_precedence() {
    let (logger, sink) = setup();
    let ctx = Ctx::background().attach_params([KvParam::int("a", 3)]);
    let err = Error::from_msg("boom").with_params([KvParam::int("a", 2)]);

    logger.warn(&ctx, &err, &[KvParam::int("a", 1)]);

    let record = &sink.records()[0];
    let a: Vec<_> = record.fields.iter().filter(|f| f.key == "a").collect();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].value, FieldValue::Int(1));
}

#[test]
fn test_native_errors() {
    let (logger, sink) = setup();
    let ctx = Ctx::background().attach_params([KvParam::bool("retry", false)]);

    let io = std::io::Error::other("connection reset");
    logger.warn(&ctx, Renderable::native(&io), &[]);

    let classified = Error::from_msg("timeout").with_type("net");
    let native = anyhow::Error::new(classified).context("fetch feed");
    logger.error(&ctx, &native, &[]);

    let records = sink.take();
    assert_eq!(records[0].message, "connection reset");
    assert_eq!(records[0].fields.len(), 1);
    assert!(records[0].field("err_type").is_none());

    assert_eq!(records[1].message, "fetch feed: timeout");
    assert_eq!(
        records[1].field("err_type").map(|f| &f.value),
        Some(&FieldValue::String("net".into()))
    );
}

#[test]
fn test_expected_errors_are_downgraded() {
    let (logger, sink) = setup();
    let not_found = Error::from_msg("not found").with_type("not_found");

    for id in [1, 2] {
        let err = Error::from_msg(format!("user {} missing", id))
            .with_type("not_found")
            .with_msg_wrap("lookup");
        if not_found.is_expected(&err) {
            logger.info(&Ctx::background(), &err.to_string(), &[KvParam::int("id", id)]);
        } else {
            logger.error(&Ctx::background(), &err, &[]);
        }
    }

    let severities: Vec<_> = sink.records().iter().map(|r| r.severity).collect();
    assert_eq!(severities, [Severity::Info, Severity::Info]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_enrichment_from_tasks() {
    let (logger, sink) = setup();
    let base = Error::from_msg("shared failure")
        .with_type("batch")
        .with_params([KvParam::string("job", "import")]);
    let ctx = Ctx::background().attach_params([KvParam::string("request_id", "r-1")]);

    let mut handles = Vec::new();
    for worker in 0..16_i64 {
        let base = base.clone();
        let ctx = ctx.attach_params([KvParam::int("worker", worker)]);
        let logger = logger.clone();
        handles.push(tokio::spawn(async move {
            let err = base.with_params([KvParam::int("item", worker * 10)]);
            logger.error(&ctx, &err, &[]);
            err
        }));
    }

    for (worker, handle) in handles.into_iter().enumerate() {
        let err = handle.await.unwrap();
        assert_eq!(
            err.params(),
            vec![
                KvParam::int("item", worker as i64 * 10),
                KvParam::string("job", "import"),
            ]
        );
    }

    assert_eq!(base.params(), vec![KvParam::string("job", "import")]);
    assert_eq!(ctx.params().len(), 1);

    let records = sink.records();
    assert_eq!(records.len(), 16);
    for record in &records {
        let worker = match record.field("worker").map(|f| &f.value) {
            Some(FieldValue::Int(w)) => *w,
            other => panic!("missing worker field: {:?}", other),
        };
        assert_eq!(
            record.field("item").map(|f| &f.value),
            Some(&FieldValue::Int(worker * 10))
        );
    }
}
