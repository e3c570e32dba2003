use flipbook_core::*;

#[test]
fn test_parse_stored_link() {
    let link = ShareLink::parse("#/flipbook/abc123").unwrap();
    assert_eq!(
        link,
        ShareLink::Stored {
            id: "abc123".to_string()
        }
    );
    assert!(link.source().is_none());
}

#[test]
fn test_parse_without_hash() {
    let link = ShareLink::parse("/flipbook/xyz/").unwrap();
    assert_eq!(
        link,
        ShareLink::Stored {
            id: "xyz".to_string()
        }
    );
}

#[test]
fn test_parse_remote_link() {
    let link = ShareLink::parse(
        "#/view?pdf=https%3A%2F%2Fexample.com%2Fdocs%2Fguide.pdf&title=User%20Guide",
    )
    .unwrap();

    assert_eq!(
        link,
        ShareLink::Remote {
            pdf_url: "https://example.com/docs/guide.pdf".to_string(),
            title: Some("User Guide".to_string()),
        }
    );
    assert_eq!(link.title(), Some("User Guide"));
    assert_eq!(
        link.source(),
        Some(DocumentSource::Url(
            "https://example.com/docs/guide.pdf".to_string()
        ))
    );
}

#[test]
fn test_parse_remote_plus_as_space_and_no_title() {
    let link = ShareLink::parse("#/view?title=Annual+Report&pdf=https://x.org/a.pdf").unwrap();
    assert_eq!(link.title(), Some("Annual Report"));

    let link = ShareLink::parse("#/view?pdf=https://x.org/a.pdf").unwrap();
    assert_eq!(link.title(), None);
}

#[test]
fn test_invalid_links() {
    for fragment in [
        "",
        "#",
        "#/flipbook/",
        "#/flipbook/a/b",
        "#/view",
        "#/view?title=Only",
        "#/view?pdf=",
        "#/settings",
    ] {
        assert!(
            matches!(ShareLink::parse(fragment), Err(FlipbookError::InvalidLink(_))),
            "'{}' should be rejected",
            fragment
        );
    }
}

#[test]
fn test_fragment_encoding() {
    let link = ShareLink::Remote {
        pdf_url: "https://host/my file.pdf?raw=1".to_string(),
        title: Some("Q&A".to_string()),
    };
    let fragment = link.to_fragment();
    assert_eq!(
        fragment,
        "#/view?pdf=https%3A%2F%2Fhost%2Fmy%20file.pdf%3Fraw%3D1&title=Q%26A"
    );
    assert_eq!(ShareLink::parse(&fragment).unwrap(), link);
}

#[test]
fn test_viewer_url_replaces_fragment() {
    let link = ShareLink::Stored {
        id: "42".to_string(),
    };
    assert_eq!(
        link.viewer_url("https://viewer.example/#/old"),
        "https://viewer.example/#/flipbook/42"
    );
}

#[test]
fn test_link_from_record() {
    let record = FlipbookRecord::new("Brochure", 12);
    let link = ShareLink::from(&record);
    assert_eq!(link.to_fragment(), format!("#/flipbook/{}", record.id));
}
