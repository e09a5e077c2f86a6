//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative
//! `docker-compose logs` output lines.

/// Structured `key=value` lines as emitted by Go services behind compose.
pub const CORPUS_STRUCTURED: &[&str] = &[
    "app1  | t=2025-04-11T16:44:22Z level=info logger=main caller=x.go:10 hello world",
    "api-1 | ts=2025-04-11T16:44:23.250+07:00 level=WARN logger=http caller=server.go:88 slow request path=/v1/orders",
    "api-1 | time=2025-04-11T16:44:24Z level=error logger=db source=pool.go:12 connection reset",
    "worker | level=debug logger=queue caller=poll.go:7 polling",
    "worker | ts=1712345678 level=notice job accepted",
    "proxy | level=trace logger=tls handshake complete",
];

/// Unstructured lines that rely on the syslog fallback and keyword inference.
pub const CORPUS_UNSTRUCTURED: &[&str] = &[
    "pg_log: Fri Apr 11 16:44:22 WIB 2025 FATAL: connection refused",
    "db  | Fri Apr 11 16:45:00 WIB 2025 LOG:  checkpoint starting: time",
    "db  | HINT:  Future log output will appear in directory \"log\".",
    "cache | panic: runtime error: index out of range",
    "web | Warning: deprecated option used; see docs",
    "app2|no structured fields here",
];

/// Lines that must not produce output.
pub const CORPUS_BLANK: &[&str] = &["", "   ", "\t", "\r"];

/// Generate `n` synthetic compose lines cycling through structured,
/// syslog-style and plain shapes.
pub fn corpus_high_volume(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i % 3 {
            0 => format!(
                "svc-{} | ts=2025-04-11T16:{:02}:{:02}Z level=info logger=main caller=m.go:{} tick {}",
                i % 5,
                i / 60 % 60,
                i % 60,
                i,
                i
            ),
            1 => format!("pg_log: Fri Apr 11 16:44:22 WIB 2025 ERROR: retry {i}"),
            _ => format!("svc-{} | plain line {}", i % 5, i),
        })
        .collect()
}
