//! Native messaging host over in-memory streams

use memo_clip::relay::framing::{read_message, write_message};
use memo_clip::relay::host::{serve, HostResponse};
use memo_clip::relay::{CaptureRequest, SelectionSpec};
use memo_clip::ConvertOptions;
use std::io::Cursor;

fn round_trip(requests: &[CaptureRequest]) -> Vec<HostResponse> {
    let mut input = Vec::new();
    for request in requests {
        write_message(&mut input, request).unwrap();
    }

    let mut output = Vec::new();
    serve(
        &mut Cursor::new(input),
        &mut output,
        &ConvertOptions::default(),
    )
    .unwrap();

    let mut reader = Cursor::new(output);
    let mut responses = Vec::new();
    while let Some(response) = read_message(&mut reader).unwrap() {
        responses.push(response);
    }
    responses
}

#[test]
fn test_host_answers_each_request_in_order() {
    let html = "<h1>Top</h1><p>body <b>text</b></p>";
    let responses = round_trip(&[
        CaptureRequest::for_page(html, SelectionSpec::Find { find: "body text".into() }),
        CaptureRequest::for_page(html, SelectionSpec::All { all: false }),
        CaptureRequest::for_page(html, SelectionSpec::Find { find: "missing".into() }),
    ]);

    assert_eq!(responses.len(), 3);

    assert_eq!(responses[0].result.markup, "body **text**");
    assert!(responses[0].result.has_formatting);
    assert_eq!(responses[0].error, None);

    assert_eq!(responses[1].result.text, "");
    assert_eq!(responses[1].error, None);

    assert!(responses[2].error.as_deref().unwrap().contains("not found"));
    assert!(!responses[2].result.has_formatting);
}
