//! SQL debug events emitted with the `tracing` feature.

#![cfg(feature = "tracing")]

use sqlfrag::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(f: impl FnOnce()) -> String {
    let out = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(out.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    out.contents()
}

#[test]
fn builder_call_emits_rendered_sql() {
    let logs = capture(|| {
        let mut w = clause(ClauseKind::WHERE, "=")
            .with_config(ClauseConfig::new().with_tag("users"));
        w.call(args![assoc! { "id" => 1 }]);
    });
    assert!(logs.contains("sqlfrag.sql"));
    assert!(logs.contains("tag=\"users\""));
    assert!(logs.contains("binding_count=1"));
    assert!(logs.contains("WHERE `id` = :id"));
}

#[test]
fn logged_sql_is_truncated() {
    let logs = capture(|| {
        let mut s = clause(ClauseKind::SELECT, "")
            .with_config(ClauseConfig::new().with_max_sql_length(9));
        s.call(args!["id", "secret_column"]);
    });
    assert!(logs.contains("SELECT id"));
    assert!(!logs.contains("secret_column"));
}

#[test]
fn reusing_single_use_builder_warns() {
    let logs = capture(|| {
        let mut once = clause(ClauseKind::SELECT | ClauseKind::SINGLE, "");
        once.call(args!["id"]);
        once.call(args!["name"]);
    });
    assert!(logs.contains("WARN"));
    assert!(logs.contains("single-use builder called again"));
}

#[test]
fn statement_finish_emits_event() {
    let logs = capture(|| {
        statement!["SELECT 1", "FROM dual"];
    });
    assert!(logs.contains("source=\"statement\""));
    assert!(logs.contains("SELECT 1 FROM dual"));
}
