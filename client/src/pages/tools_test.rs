use super::*;

#[test]
fn blank_prompt_defers_to_server_default() {
    assert_eq!(optional_prompt("   "), None);
    assert_eq!(optional_prompt(" label the heart "), Some("label the heart".to_owned()));
}

#[test]
fn mime_is_read_from_data_url_header() {
    assert_eq!(data_url_mime("data:video/mp4;base64,AAAA"), Some("video/mp4"));
    assert_eq!(data_url_mime("data:image/png;base64,iVBOR"), Some("image/png"));
    assert_eq!(data_url_mime("data:;base64,AAAA"), None);
    assert_eq!(data_url_mime("https://example.com/a.mp4"), None);
}

#[test]
fn every_tab_has_a_label() {
    for tab in ToolTab::ALL {
        assert!(!tab.label().is_empty());
    }
}
