fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;

    use studiofs_protocol::messages::{
        FileContentResponse, PasteRequest, PathRequest, RenameRequest, WriteFileRequest,
    };
    use studiofs_protocol::{
        ClipboardInfo, ClipboardMode, EntryKind, ErrorKind, Message, MessageType, ProjectSummary,
        TreeEntry,
    };

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Reads a fixture file as text.
    fn read_fixture(name: &str) -> String {
        let path = fixtures_dir().join(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent comparison).
    ///
    /// Parsing goes through the fixture text rather than a `Value` because
    /// envelopes keep their payload as raw JSON.
    fn roundtrip_test<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let text = read_fixture(name);
        let fixture: serde_json::Value = serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("failed to parse fixture {name}: {e}"));
        let parsed: T = serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  Rust:    {reserialized}"
        );
        parsed
    }

    // --- Data model ---

    #[test]
    fn fixture_project_summaries() {
        let projects = roundtrip_test::<Vec<ProjectSummary>>("project_summaries.json");
        assert_eq!(projects[0].name, "Portfolio");
        assert_eq!(projects[0].created_at, 1_760_534_400_000);
    }

    #[test]
    fn fixture_tree_entries() {
        let tree = roundtrip_test::<Vec<TreeEntry>>("tree_entries.json");
        assert_eq!(tree[0].kind, EntryKind::Folder);
        assert_eq!(tree[0].children().len(), 2);
        assert_eq!(tree[0].children()[0].children, Some(Vec::new()));
        assert_eq!(tree[1].kind, EntryKind::File);
        assert!(tree[1].children.is_none());
    }

    #[test]
    fn fixture_clipboard_empty() {
        let info = roundtrip_test::<ClipboardInfo>("clipboard_empty.json");
        assert_eq!(info, ClipboardInfo::Empty);
    }

    #[test]
    fn fixture_clipboard_holding() {
        let info = roundtrip_test::<ClipboardInfo>("clipboard_holding.json");
        assert_eq!(
            info,
            ClipboardInfo::Holding {
                project_name: "Portfolio".into(),
                relative_path: "css/main.css".into(),
                mode: ClipboardMode::Cut,
            }
        );
    }

    // --- Request payloads ---

    #[test]
    fn fixture_path_request() {
        roundtrip_test::<PathRequest>("path_request.json");
    }

    #[test]
    fn fixture_rename_request() {
        let req = roundtrip_test::<RenameRequest>("rename_request.json");
        assert_eq!(req.new_name, "site.css");
    }

    #[test]
    fn fixture_paste_request() {
        roundtrip_test::<PasteRequest>("paste_request.json");
    }

    // --- Envelopes ---

    #[test]
    fn fixture_request_write_file() {
        let msg = roundtrip_test::<Message>("request_write_file.json");
        assert_eq!(msg.msg_type, MessageType::WriteFile);
        let req: WriteFileRequest = msg.parse_payload().unwrap().unwrap();
        assert_eq!(req.relative_path, "css/main.css");
        assert_eq!(req.content, "body {\n    margin: 0;\n}\n");
    }

    #[test]
    fn fixture_request_without_payload() {
        let msg = roundtrip_test::<Message>("request_list_projects.json");
        assert_eq!(msg.msg_type, MessageType::ListProjects);
        assert!(msg.payload.is_none());
    }

    #[test]
    fn fixture_reply_read_file() {
        let msg = roundtrip_test::<Message>("reply_read_file.json");
        assert_eq!(msg.msg_type, MessageType::Result);
        let body: FileContentResponse = msg.parse_payload().unwrap().unwrap();
        assert!(body.content.starts_with("// JavaScript for Portfolio"));
    }

    #[test]
    fn fixture_reply_error() {
        let msg = roundtrip_test::<Message>("reply_error.json");
        assert!(msg.is_error());
        let err = msg.error.unwrap();
        assert_eq!(err.kind, ErrorKind::AccessDenied);
        assert_eq!(err.code, err.kind.code());
    }

    #[test]
    fn fixture_reply_pong() {
        let msg = roundtrip_test::<Message>("reply_pong.json");
        assert_eq!(msg.msg_type, MessageType::Pong);
    }

    #[test]
    fn built_error_reply_matches_fixture() {
        let request = Message::new::<()>("req-4", MessageType::ReadFile, None).unwrap();
        let reply = request.reply_error(
            ErrorKind::AccessDenied,
            "access denied: path escapes project root: ../../etc/passwd",
        );

        let fixture: serde_json::Value =
            serde_json::from_str(&read_fixture("reply_error.json")).unwrap();
        assert_eq!(serde_json::to_value(&reply).unwrap(), fixture);
    }

    #[test]
    fn fixture_error_codes() {
        let table: BTreeMap<String, i32> =
            serde_json::from_str(&read_fixture("error_codes.json")).unwrap();
        assert_eq!(table.len(), 14);

        for (name, code) in table {
            let kind: ErrorKind = serde_json::from_value(serde_json::Value::String(name.clone()))
                .unwrap_or_else(|e| panic!("unknown error kind {name}: {e}"));
            assert_eq!(kind.code(), code, "code mismatch for {name}");
        }
    }
}
