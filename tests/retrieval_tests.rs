use std::sync::Arc;
use std::time::Duration;

use cutlist_cli::adapters::{CutlistAtAdapter, CutlistServerConfig, TracingProgressAdapter};
use cutlist_cli::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VIDEO_KEY: &str = "Show_23.01.01_20-15_ard_90_TVOON_DE.mpg.avi";

/// Shared fixtures for the repository scenarios
mod test_utils {
    use super::*;

    pub const HEADER_INDEX: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>
<cutlists>
  <cutlist row_index=\"0\">
    <id>100</id>
    <name>Show_23.01.01_20-15_ard_90_TVOON_DE.mpg.avi.cutlist</name>
    <rating>7.5</rating>
  </cutlist>
  <cutlist row_index=\"1\">
    <id>200</id>
    <name>Show_23.01.01_20-15_ard_90_TVOON_DE.mpg.avi.cutlist</name>
    <rating>9.0</rating>
  </cutlist>
</cutlists>";

    pub const TIME_BASED_CUTLIST: &str = "[General]
Application=SomeCutter
NoOfCuts=2
DisplayAspectRatio=16:9
IntendedCutApplicationName=Avidemux
FramesPerSecond=25

[Cut0]
Start=10.5
Duration=300.25

[Cut1]
Start=900
Duration=600
";

    pub const TRUNCATED_CUTLIST: &str = "[General]
NoOfCuts=3
FramesPerSecond=25

[Cut0]
StartFrame=100
DurationFrames=2500

[Cut1]
StartFrame=5000
DurationFrames=2500
";

    pub const FRAME_BASED_CUTLIST: &str = "[General]
NoOfCuts=1
FramesPerSecond=25

[Cut0]
StartFrame=250
DurationFrames=7500
";

    pub fn interactor(server: &MockServer) -> RetrieveInteractor {
        let adapter = CutlistAtAdapter::new(CutlistServerConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
            ..CutlistServerConfig::default()
        })
        .unwrap();

        RetrieveInteractor::new(Arc::new(adapter), Arc::new(TracingProgressAdapter::new()))
            .with_tick_interval(Duration::from_millis(20))
    }

    pub async fn mount_index(server: &MockServer, body: &str) {
        Mock::given(method("GET"))
            .and(path("/getxml.php"))
            .and(query_param("name", VIDEO_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(1)
            .mount(server)
            .await;
    }

    pub async fn mount_file(server: &MockServer, id: &str, body: &str, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/getfile.php"))
            .and(query_param("id", id))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expected_calls)
            .mount(server)
            .await;
    }
}

use test_utils::*;

#[tokio::test]
async fn test_best_rated_cutlist_is_selected() {
    let server = MockServer::start().await;
    mount_index(&server, HEADER_INDEX).await;
    mount_file(&server, "200", TIME_BASED_CUTLIST, 1).await;
    // Never queried once "200" validates
    mount_file(&server, "100", FRAME_BASED_CUTLIST, 0).await;

    let outcome = interactor(&server).retrieve(VIDEO_KEY).await;

    let cutlist = outcome.cutlist().expect("cutlist selected");
    assert_eq!(cutlist.id, "200");
    assert!(cutlist.time_based);
    assert!(!cutlist.frame_based);
    assert_eq!(cutlist.segments.len(), 2);
    assert_eq!(cutlist.segments[0].time_start, 10.5);
    assert_eq!(cutlist.segments[0].time_duration, 300.25);
    assert_eq!(cutlist.segments[1].time_start, 900.0);
    assert_eq!(cutlist.aspect_ratio, "16:9");
    assert_eq!(cutlist.application, "Avidemux");
    assert_eq!(cutlist.frames_per_second, 25.0);
}

#[tokio::test]
async fn test_truncated_cutlist_falls_back_to_next_candidate() {
    let server = MockServer::start().await;
    mount_index(&server, HEADER_INDEX).await;
    mount_file(&server, "200", TRUNCATED_CUTLIST, 1).await;
    mount_file(&server, "100", FRAME_BASED_CUTLIST, 1).await;

    let outcome = interactor(&server).retrieve(VIDEO_KEY).await;

    let cutlist = outcome.cutlist().expect("fallback cutlist selected");
    assert_eq!(cutlist.id, "100");
    assert!(cutlist.frame_based);
    assert_eq!(cutlist.segments, vec![Segment::from_frames(250, 7500)]);
}

#[tokio::test]
async fn test_server_error_on_candidate_falls_back() {
    let server = MockServer::start().await;
    mount_index(&server, HEADER_INDEX).await;
    Mock::given(method("GET"))
        .and(path("/getfile.php"))
        .and(query_param("id", "200"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    mount_file(&server, "100", FRAME_BASED_CUTLIST, 1).await;

    let outcome = interactor(&server).retrieve(VIDEO_KEY).await;
    assert_eq!(outcome.cutlist().map(|c| c.id.as_str()), Some("100"));
}

#[tokio::test]
async fn test_no_candidates_issues_no_detail_request() {
    let server = MockServer::start().await;
    mount_index(&server, "<?xml version=\"1.0\"?><cutlists></cutlists>").await;
    Mock::given(method("GET"))
        .and(path("/getfile.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(TIME_BASED_CUTLIST))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = interactor(&server).retrieve(VIDEO_KEY).await;
    assert_eq!(
        outcome.result,
        Err(DomainError::NoCutlistHeader {
            video_key: VIDEO_KEY.to_string()
        })
    );
}

#[tokio::test]
async fn test_unreachable_index_reports_no_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getxml.php"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = interactor(&server).retrieve(VIDEO_KEY).await;
    assert!(!outcome.is_success());
    assert!(matches!(
        outcome.result,
        Err(DomainError::NoCutlistHeader { .. })
    ));
}

#[tokio::test]
async fn test_all_candidates_invalid_reports_exhaustion() {
    let server = MockServer::start().await;
    mount_index(&server, HEADER_INDEX).await;
    mount_file(&server, "200", TRUNCATED_CUTLIST, 1).await;
    mount_file(&server, "100", "not an ini file [", 1).await;

    let outcome = interactor(&server).retrieve(VIDEO_KEY).await;
    assert_eq!(
        outcome.result,
        Err(DomainError::NoCutlistRetrieved {
            video_key: VIDEO_KEY.to_string()
        })
    );
}

#[tokio::test]
async fn test_has_cutlists_only_reads_index() {
    let server = MockServer::start().await;
    mount_index(&server, HEADER_INDEX).await;
    Mock::given(method("GET"))
        .and(path("/getfile.php"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    assert!(interactor(&server).has_cutlists(VIDEO_KEY).await);
}

#[tokio::test]
async fn test_ranked_candidates_from_server() {
    let server = MockServer::start().await;
    mount_index(&server, HEADER_INDEX).await;

    let ranked = interactor(&server).load_ranked_candidates(VIDEO_KEY).await;
    assert_eq!(ranked, vec!["200".to_string(), "100".to_string()]);
}
