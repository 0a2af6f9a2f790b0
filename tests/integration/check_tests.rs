//! Integration tests for the checker
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! page and link checking cycle end-to-end.

use flate2::write::GzEncoder;
use flate2::Compression;
use page_checker::config::{parse_config, UserAgent};
use page_checker::{check_pages, CheckError, MemoryReporter, Options, RunOutcome};
use std::io::Write;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Drops the trailing ` (123ms)` from a log line
fn strip_elapsed(line: &str) -> String {
    match line.rsplit_once(" (") {
        Some((head, tail))
            if tail.ends_with("ms)")
                && tail[..tail.len() - 3].chars().all(|c| c.is_ascii_digit()) =>
        {
            head.to_string()
        }
        _ => line.to_string(),
    }
}

fn oks(reporter: &MemoryReporter) -> Vec<String> {
    reporter.oks().into_iter().map(strip_elapsed).collect()
}

fn issues(reporter: &MemoryReporter) -> Vec<String> {
    reporter.issues().into_iter().map(strip_elapsed).collect()
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.to_string())
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

async fn mount_head_ok(server: &MockServer) {
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

fn link_options(pages: Vec<String>) -> Options {
    Options {
        page_urls: pages,
        check_links: true,
        ..Default::default()
    }
}

async fn run(options: Options) -> (Result<RunOutcome, CheckError>, MemoryReporter) {
    let mut reporter = MemoryReporter::new();
    let result = check_pages(options, &mut reporter).await;
    (result, reporter)
}

fn expect_issues(result: Result<RunOutcome, CheckError>) -> (usize, String) {
    match result {
        Err(CheckError::Issues { count, message }) => (count, message),
        other => panic!("expected issues, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_page_list() {
    let (result, reporter) = run(Options::default()).await;
    let outcome = result.expect("empty run should pass");
    assert_eq!(outcome.issue_count, 0);
    assert!(reporter.lines.is_empty());
}

#[tokio::test]
async fn test_bad_page() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (result, reporter) = run(link_options(vec![format!("{}/missing", base)])).await;
    let (count, message) = expect_issues(result);

    assert_eq!(count, 1);
    assert_eq!(message, "1 issue, see above");
    assert_eq!(issues(&reporter), vec![format!("Bad page (404): {}/missing", base)]);
    assert!(reporter.oks().is_empty());
}

#[tokio::test]
async fn test_valid_page_and_links() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/a">A</a><img src="b.png"></body></html>"#,
    )
    .await;
    mount_head_ok(&server).await;

    let (result, reporter) = run(link_options(vec![format!("{}/", base)])).await;
    let outcome = result.expect("run should pass");

    assert_eq!(
        oks(&reporter),
        vec![
            format!("Page: {}/", base),
            format!("Link: {}/a", base),
            format!("Link: {}/b.png", base),
        ]
    );
    assert_eq!(outcome.statistics.pages_checked, 1);
    assert_eq!(outcome.statistics.links_checked, 2);
}

#[tokio::test]
async fn test_links_checked_before_next_page() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/one", r#"<a href="/from-one">x</a>"#).await;
    mount_page(&server, "/two", r#"<a href="/from-two">x</a>"#).await;
    mount_head_ok(&server).await;

    let pages = vec![format!("{}/one", base), format!("{}/two", base)];
    let (result, reporter) = run(link_options(pages)).await;
    assert!(result.is_ok());

    assert_eq!(
        oks(&reporter),
        vec![
            format!("Page: {}/one", base),
            format!("Link: {}/from-one", base),
            format!("Page: {}/two", base),
            format!("Link: {}/from-two", base),
        ]
    );
}

#[tokio::test]
async fn test_head_failure_retried_as_get() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/flaky">x</a>"#).await;
    Mock::given(method("HEAD"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (result, reporter) = run(link_options(vec![format!("{}/", base)])).await;
    let outcome = result.expect("retry should succeed");

    assert_eq!(outcome.statistics.retries, 1);
    assert_eq!(
        oks(&reporter),
        vec![format!("Page: {}/", base), format!("Link: {}/flaky", base)]
    );
}

#[tokio::test]
async fn test_bad_link_after_retry() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/gone">x</a>"#).await;
    Mock::given(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let (result, reporter) = run(link_options(vec![format!("{}/", base)])).await;
    let (count, message) = expect_issues(result);

    assert_eq!(count, 1);
    assert_eq!(message, "1 issue, see above");
    assert_eq!(issues(&reporter), vec![format!("Bad link (404): {}/gone", base)]);
}

#[tokio::test]
async fn test_link_error() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="http://127.0.0.1:1/closed">x</a>"#).await;

    let (result, reporter) = run(link_options(vec![format!("{}/", base)])).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 1);
    let found = issues(&reporter);
    assert!(found[0].starts_with("Link error ("));
    assert!(found[0].ends_with("): http://127.0.0.1:1/closed"));
}

#[tokio::test]
async fn test_unresolvable_links_reported() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(
        &server,
        "/",
        r#"<a href="http://exa mple.com/">1</a><a href="ftp://example.com/f">2</a><a href="/ok">3</a>"#,
    )
    .await;
    mount_head_ok(&server).await;

    let (result, reporter) = run(link_options(vec![format!("{}/", base)])).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 2);
    let reported = issues(&reporter);
    assert!(reported[0].starts_with("Link error ("));
    assert!(reported[0].ends_with("): http://exa mple.com/"));
    assert_eq!(
        reported[1],
        "Link error (Unsupported URL scheme: ftp): ftp://example.com/f"
    );
    assert_eq!(
        oks(&reporter),
        vec![format!("Page: {}/", base), format!("Link: {}/ok", base)]
    );
}

#[tokio::test]
async fn test_ignored_unresolvable_link() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="ftp://example.com/f">1</a>"#).await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.links_to_ignore = vec!["ftp://example.com/f".to_string()];
    let (result, reporter) = run(options).await;

    assert!(result.is_ok());
    assert!(reporter.issues().is_empty());
}

#[tokio::test]
async fn test_visited_links_checked_once() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(
        &server,
        "/",
        r##"<a href="/x">1</a><a href="/x#part">2</a><a href="/x">3</a>"##,
    )
    .await;
    Mock::given(method("HEAD"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let (result, reporter) = run(link_options(vec![format!("{}/", base)])).await;
    let outcome = result.expect("run should pass");

    assert_eq!(
        oks(&reporter),
        vec![
            format!("Page: {}/", base),
            format!("Link: {}/x", base),
            format!("Visited link: {}/x#part", base),
            format!("Visited link: {}/x", base),
        ]
    );
    assert_eq!(outcome.statistics.links_visited, 2);
}

#[tokio::test]
async fn test_empty_fragment() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r##"<a href="/a#">x</a>"##).await;
    mount_head_ok(&server).await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.no_empty_fragments = true;
    let (result, reporter) = run(options).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 1);
    assert_eq!(issues(&reporter), vec![format!("Empty fragment: {}/a#", base)]);
    assert!(oks(&reporter).contains(&format!("Link: {}/a#", base)));
}

#[tokio::test]
async fn test_query_hashes() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(
        &server,
        "/",
        r#"<html><body>
            <a href="/file.txt?md5=5D41402ABC4B2A76B9719D911017C592">md5</a>
            <a href="/file.txt?sha1=aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d">sha1</a>
            <a href="/file.txt?crc32=3610a686">crc32</a>
            <a href="/file.txt?md5=00000000000000000000000000000000">bad</a>
        </body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/file.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&server)
        .await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.query_hashes = true;
    let (result, reporter) = run(options).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 1);
    let found = oks(&reporter);
    assert!(found.contains(&format!(
        "Hash: {}/file.txt?md5=5D41402ABC4B2A76B9719D911017C592",
        base
    )));
    assert!(found.contains(&format!(
        "Hash: {}/file.txt?sha1=aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d",
        base
    )));
    assert!(found.contains(&format!("Hash: {}/file.txt?crc32=3610a686", base)));
    assert_eq!(
        issues(&reporter),
        vec![format!(
            "Hash error (5d41402abc4b2a76b9719d911017c592): {}/file.txt?md5=00000000000000000000000000000000",
            base
        )]
    );
}

#[tokio::test]
async fn test_hashes_ignored_without_option() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/file.txt?md5=0">x</a>"#).await;
    mount_head_ok(&server).await;

    let (result, reporter) = run(link_options(vec![format!("{}/", base)])).await;
    assert!(result.is_ok());
    assert!(!oks(&reporter).iter().any(|line| line.starts_with("Hash")));
}

#[tokio::test]
async fn test_missing_caching_headers() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", "<html></html>").await;

    let options = Options {
        page_urls: vec![format!("{}/", base)],
        check_caching: true,
        ..Default::default()
    };
    let (result, reporter) = run(options).await;
    let (count, message) = expect_issues(result);

    assert_eq!(count, 2);
    assert_eq!(message, "2 issues, see above");
    assert_eq!(
        issues(&reporter),
        vec![
            "Missing Cache-Control header in response",
            "Missing ETag header in response"
        ]
    );
}

#[tokio::test]
async fn test_valid_caching_headers() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            html_page("<html></html>")
                .insert_header("cache-control", "public, max-age=600")
                .insert_header("etag", "\"v1\""),
        )
        .mount(&server)
        .await;

    let options = Options {
        page_urls: vec![format!("{}/", base)],
        check_caching: true,
        ..Default::default()
    };
    let (result, _) = run(options).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_compressed_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(br#"<html><body><a href="/inside">x</a></body></html>"#)
        .unwrap();
    let compressed = encoder.finish().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(compressed)
                .insert_header("content-type", "text/html")
                .insert_header("content-encoding", "gzip"),
        )
        .mount(&server)
        .await;
    mount_head_ok(&server).await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.check_compression = true;
    let (result, reporter) = run(options).await;

    assert!(result.is_ok());
    assert!(oks(&reporter).contains(&format!("Link: {}/inside", base)));
}

#[tokio::test]
async fn test_uncompressed_page() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", "<html></html>").await;

    let options = Options {
        page_urls: vec![format!("{}/", base)],
        check_compression: true,
        ..Default::default()
    };
    let (result, reporter) = run(options).await;

    assert!(result.is_err());
    assert_eq!(
        issues(&reporter),
        vec!["Missing Content-Encoding header in response"]
    );
}

#[tokio::test]
async fn test_slow_page() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page("<html></html>").set_delay(Duration::from_millis(300)))
        .mount(&server)
        .await;

    let options = Options {
        page_urls: vec![format!("{}/", base)],
        max_response_time: Some(Duration::from_millis(50)),
        ..Default::default()
    };
    let (result, reporter) = run(options).await;

    assert!(result.is_err());
    assert_eq!(
        issues(&reporter),
        vec!["Page response took more than 50ms to complete"]
    );
}

#[tokio::test]
async fn test_xhtml_errors() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(
        &server,
        "/bad",
        "<html>\n<body>\n<div>\n<p>text\n</div>\n</body>\n</html>",
    )
    .await;
    mount_page(&server, "/good", "<html><body><p>ok</p></body></html>").await;

    let options = Options {
        page_urls: vec![format!("{}/bad", base), format!("{}/good", base)],
        check_xhtml: true,
        ..Default::default()
    };
    let (result, reporter) = run(options).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 1);
    assert_eq!(
        issues(&reporter),
        vec!["Unexpected close tag, Line: 4, Column: 6, Char: >"]
    );
}

#[tokio::test]
async fn test_page_redirect() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/p"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/q"))
        .mount(&server)
        .await;
    mount_page(&server, "/q", r#"<a href="a">x</a>"#).await;
    mount_head_ok(&server).await;

    let (result, reporter) = run(link_options(vec![format!("{}/p", base)])).await;
    assert!(result.is_ok());

    assert_eq!(
        oks(&reporter),
        vec![
            format!("Page: {}/p -> {}/q", base, base),
            format!("Link: {}/a", base),
        ]
    );
}

#[tokio::test]
async fn test_redirected_links() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/old">1</a><a href="/nowhere">2</a>"#).await;
    Mock::given(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&server)
        .await;
    Mock::given(path("/nowhere"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.no_redirects = true;
    let (result, reporter) = run(options).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 2);
    assert_eq!(
        issues(&reporter),
        vec![
            format!("Redirected link (301): {}/old -> /new", base),
            format!("Redirected link (302): {}/nowhere -> [Missing Location header]", base),
        ]
    );
}

#[tokio::test]
async fn test_redirected_link_reports_elapsed() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/old">1</a>"#).await;
    Mock::given(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&server)
        .await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.no_redirects = true;
    let (result, reporter) = run(options).await;
    expect_issues(result);

    let raw = reporter.issues();
    assert_eq!(raw.len(), 1);
    assert!(raw[0].starts_with(&format!("Redirected link (301): {}/old -> /new (", base)));
    assert!(raw[0].ends_with("ms)"));
}

#[tokio::test]
async fn test_head_redirect_retried_as_get() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/r">1</a>"#).await;
    Mock::given(method("HEAD"))
        .and(path("/r"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/elsewhere"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.no_redirects = true;
    let (result, reporter) = run(options).await;
    let outcome = result.expect("GET answered OK");

    assert!(issues(&reporter).is_empty());
    assert_eq!(
        oks(&reporter),
        vec![format!("Page: {}/", base), format!("Link: {}/r", base)]
    );
    assert_eq!(outcome.statistics.retries, 1);
}

#[tokio::test]
async fn test_redirects_followed_by_default() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/old">1</a>"#).await;
    Mock::given(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&server)
        .await;
    Mock::given(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let (result, reporter) = run(link_options(vec![format!("{}/", base)])).await;
    assert!(result.is_ok());
    assert!(oks(&reporter).contains(&format!("Link: {}/old", base)));
}

#[tokio::test]
async fn test_filtered_links() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(
        &server,
        "/",
        r#"<a href="/kept">1</a><a href="/ignored">2</a><a href="http://other.invalid/x">3</a>"#,
    )
    .await;
    mount_head_ok(&server).await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.only_same_domain = true;
    options.links_to_ignore = vec![format!("{}/ignored", base)];
    let (result, reporter) = run(options).await;

    assert!(result.is_ok());
    assert_eq!(
        oks(&reporter),
        vec![format!("Page: {}/", base), format!("Link: {}/kept", base)]
    );
}

#[tokio::test]
async fn test_local_links() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/a">x</a>"#).await;
    mount_head_ok(&server).await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.no_local_links = true;
    let (result, reporter) = run(options).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 1);
    assert_eq!(issues(&reporter), vec![format!("Local link: {}/a", base)]);
    assert!(oks(&reporter).contains(&format!("Link: {}/a", base)));
}

#[tokio::test]
async fn test_prefer_secure_probe_fails() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/a">x</a>"#).await;
    mount_head_ok(&server).await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.prefer_secure = true;
    let (result, reporter) = run(options).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 1);
    assert_eq!(issues(&reporter), vec![format!("Insecure link: {}/a", base)]);
    assert!(oks(&reporter).contains(&format!("Link: {}/a", base)));
}

#[tokio::test]
async fn test_user_agent_sent() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "Custom/1.0"))
        .and(header("cache-control", "no-cache"))
        .and(header("pragma", "no-cache"))
        .respond_with(html_page("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let options = Options {
        page_urls: vec![format!("{}/", base)],
        user_agent: UserAgent::Custom("Custom/1.0".to_string()),
        ..Default::default()
    };
    let (result, _) = run(options).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_summary_mode() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/gone">1</a>"#).await;
    Mock::given(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut options = link_options(vec![format!("{}/", base), format!("{}/broken", base)]);
    options.summary = true;
    let (result, _) = run(options).await;
    let (count, message) = expect_issues(result);

    assert_eq!(count, 2);
    let lines: Vec<String> = message.lines().map(strip_elapsed).collect();
    assert_eq!(
        lines,
        vec![
            "Summary of issues:".to_string(),
            format!(" {}/", base),
            format!("  Bad link (404): {}/gone", base),
            format!(" {}/broken", base),
            format!("  Bad page (500): {}/broken", base),
            "2 issues, see above".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_terse_mode() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", r#"<a href="/gone">1</a>"#).await;
    Mock::given(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut options = link_options(vec![format!("{}/", base)]);
    options.terse = true;
    let (result, reporter) = run(options).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 1);
    assert!(reporter.oks().is_empty());
    assert_eq!(reporter.issues(), vec!["Checked 1 page and 1 link, 1 issue"]);
}

#[tokio::test]
async fn test_terse_summary_mode() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut options = link_options(vec![format!("{}/broken", base)]);
    options.terse = true;
    options.summary = true;
    let (result, reporter) = run(options).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 1);
    assert!(reporter.oks().is_empty());
    assert_eq!(
        issues(&reporter),
        vec![
            "Summary of issues:".to_string(),
            format!(" {}/broken", base),
            format!("  Bad page (500): {}/broken", base),
            "Checked 1 page and 0 links, 1 issue".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_local_file_page() {
    let dir = tempfile::tempdir().unwrap();
    let index = dir.path().join("index.html");
    std::fs::write(
        &index,
        r#"<html><body><a href="other.html">1</a><a href="missing.html">2</a></body></html>"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("other.html"), "<html></html>").unwrap();

    let root = std::fs::canonicalize(dir.path()).unwrap();
    let other = Url::from_file_path(root.join("other.html")).unwrap();
    let missing = Url::from_file_path(root.join("missing.html")).unwrap();
    let page = index.display().to_string();

    let (result, reporter) = run(link_options(vec![page.clone()])).await;
    let (count, _) = expect_issues(result);

    assert_eq!(count, 1);
    assert_eq!(
        oks(&reporter),
        vec![format!("Page: {}", page), format!("Link: {}", other)]
    );
    let found = issues(&reporter);
    assert!(found[0].starts_with("Link error ("));
    assert!(found[0].ends_with(&format!("): {}", missing)));
}

#[tokio::test]
async fn test_report_file_written() {
    let server = MockServer::start().await;
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.md");
    let options = Options {
        page_urls: vec![format!("{}/broken", base)],
        report_path: Some(report.display().to_string()),
        ..Default::default()
    };
    let (result, _) = run(options).await;
    assert!(result.is_err());

    let written = std::fs::read_to_string(&report).unwrap();
    assert!(written.contains("- **Status**: failed"));
    assert!(written.contains(&format!("### {}/broken", base)));
    assert!(written.contains("**1 issue**"));
}

#[test]
fn test_config_validation_messages() {
    let err = parse_config("check-links = true").unwrap_err();
    assert_eq!(
        err.to_string(),
        "pageUrls option is not present; it should be an array of URLs"
    );

    let err = parse_config("page-urls = \"http://example.com/\"").unwrap_err();
    assert_eq!(
        err.to_string(),
        "pageUrls option is invalid; it should be an array of URLs"
    );

    let err = parse_config("page-urls = []\nmax-response-time = -1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "maxResponseTime option is invalid; it should be a positive number"
    );
}

#[test]
fn test_config_file_round_trip() {
    let options = parse_config(
        r#"
        page-urls = ["http://example.com/"]
        check-links = true
        only-same-domain = true
        links-to-ignore = ["http://example.com/skip"]
        max-response-time = 500
        user-agent = false
        "#,
    )
    .unwrap();

    assert_eq!(options.page_urls, vec!["http://example.com/"]);
    assert!(options.check_links);
    assert!(options.only_same_domain);
    assert_eq!(options.links_to_ignore, vec!["http://example.com/skip"]);
    assert_eq!(options.max_response_time, Some(Duration::from_millis(500)));
    assert_eq!(options.user_agent, UserAgent::Disabled);
}
