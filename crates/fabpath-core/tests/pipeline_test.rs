#![allow(clippy::unwrap_used)]
// End-to-end pipeline tests over the saved fabric fixture.

use std::collections::HashSet;
use std::path::PathBuf;

use pretty_assertions::assert_eq;

use fabpath_core::{
    DumpSource, IndexPolicy, PortMode, ReportMode, ReportOptions, ResolvedBinding, Snapshot,
    report,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fabric")
}

async fn analyze_fixture() -> fabpath_core::Analysis {
    let snapshot = Snapshot::fetch(&DumpSource::new(fixture_dir()))
        .await
        .unwrap();
    snapshot
        .to_inventory()
        .unwrap()
        .analyze(&IndexPolicy::default())
        .unwrap()
}

fn rows(bindings: &[ResolvedBinding]) -> Vec<(String, String, String, String, String)> {
    bindings
        .iter()
        .map(|b| {
            (
                b.epg.clone(),
                b.vlan.clone(),
                b.node.clone(),
                b.interface.clone(),
                b.port_channel_label().to_owned(),
            )
        })
        .collect()
}

// ── Index ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_index_skips_single_port_access_selectors() {
    let analysis = analyze_fixture().await;

    let names: Vec<_> = analysis.index.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["PC-SEL1", "VPC-SEL1", "VPC-WIDE"]);
    assert!(analysis.index.get("ACCESS-5").is_none());
}

// ── Resolution ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_fixture_resolves_every_binding_kind() {
    let analysis = analyze_fixture().await;
    let s = |v: &str| v.to_owned();

    assert_eq!(
        rows(&analysis.resolution.bindings),
        vec![
            (s("WEB"), s("100"), s("101"), s("eth1/5"), s("none")),
            (s("MGMT"), s("101"), s("101"), s("eth1/5"), s("none")),
            (s("APP"), s("50"), s("102"), s("eth1/1"), s("PC-SEL1")),
            (s("APP"), s("50"), s("102"), s("eth1/2"), s("PC-SEL1")),
            (s("APP"), s("50"), s("102"), s("eth1/3"), s("PC-SEL1")),
            (s("DB"), s("30"), s("201"), s("eth1/10"), s("VPC-SEL1")),
            (s("DB"), s("30"), s("202"), s("eth1/10"), s("VPC-SEL1")),
            (s("DB"), s("31"), s("301"), s("eth1/20"), s("VPC-WIDE")),
            (s("DB"), s("31"), s("302"), s("eth1/20"), s("VPC-WIDE")),
        ]
    );
    assert_eq!(analysis.resolution.bindings[1].mode, PortMode::Access);

    assert_eq!(analysis.resolution.bogus.len(), 1);
    assert_eq!(
        analysis.resolution.bogus[0].to_string(),
        "EPG: DB Node(s): 101 port selector: GHOST"
    );
}

#[tokio::test]
async fn test_every_resolved_node_is_a_single_leaf() {
    let analysis = analyze_fixture().await;
    assert!(
        analysis
            .resolution
            .bindings
            .iter()
            .all(|b| b.node.len() == 3 && !b.node.contains('-'))
    );
}

#[tokio::test]
async fn test_pipeline_is_idempotent() {
    let first = analyze_fixture().await;
    let second = analyze_fixture().await;

    let a: HashSet<_> = first.resolution.bindings.into_iter().collect();
    let b: HashSet<_> = second.resolution.bindings.into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(first.resolution.bogus, second.resolution.bogus);
}

// ── Report ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_report_writes_all_files() {
    let analysis = analyze_fixture().await;
    let out = tempfile::tempdir().unwrap();
    let opts = ReportOptions {
        mode: ReportMode::Both,
        out_dir: out.path().to_path_buf(),
        ..ReportOptions::default()
    };

    let summary = report::write_report(&analysis.resolution, &opts).unwrap();

    assert_eq!(summary.bindings, 9);
    assert_eq!(summary.interfaces, 8);
    assert_eq!(summary.bogus, 1);
    assert_eq!(summary.written.len(), 3);

    let csv = std::fs::read_to_string(out.path().join("static_paths.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("epg,VLAN,mode,node,interface,port-channel"));
    assert_eq!(lines.next(), Some("WEB,100,trunk,101,eth1/5,none"));
    assert_eq!(csv.lines().count(), 10);

    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(out.path().join("interfaces.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        json["101__eth1/5"],
        serde_json::json!({ "switch": "101", "intf": "eth1/5", "tagged": ["100"], "untagged": "101" })
    );
    assert_eq!(json["202__eth1/10"]["tagged"], serde_json::json!(["30"]));

    let bogus = std::fs::read_to_string(out.path().join("bogus_paths.txt")).unwrap();
    assert_eq!(bogus, "EPG: DB Node(s): 101 port selector: GHOST\n");
}

#[tokio::test]
async fn test_report_without_bogus_skips_diagnostics() {
    let mut analysis = analyze_fixture().await;
    analysis.resolution.bogus.clear();
    let out = tempfile::tempdir().unwrap();
    let opts = ReportOptions {
        out_dir: out.path().to_path_buf(),
        ..ReportOptions::default()
    };

    let summary = report::write_report(&analysis.resolution, &opts).unwrap();

    assert_eq!(summary.written, vec![out.path().join("static_paths.csv")]);
    assert!(!out.path().join("bogus_paths.txt").exists());
    assert!(!out.path().join("interfaces.json").exists());
}

#[tokio::test]
async fn test_clean_report_removes_stale_diagnostics() {
    let mut analysis = analyze_fixture().await;
    analysis.resolution.bogus.clear();
    let out = tempfile::tempdir().unwrap();
    let stale = out.path().join("bogus_paths.txt");
    std::fs::write(&stale, "EPG: OLD Node(s): 101 port selector: GHOST\n").unwrap();
    let opts = ReportOptions {
        out_dir: out.path().to_path_buf(),
        ..ReportOptions::default()
    };

    let summary = report::write_report(&analysis.resolution, &opts).unwrap();

    assert!(!stale.exists());
    assert_eq!(summary.bogus, 0);
    assert_eq!(summary.written, vec![out.path().join("static_paths.csv")]);
}

#[tokio::test]
async fn test_flat_report_still_counts_interfaces() {
    let analysis = analyze_fixture().await;
    let out = tempfile::tempdir().unwrap();
    let opts = ReportOptions {
        mode: ReportMode::Flat,
        out_dir: out.path().to_path_buf(),
        ..ReportOptions::default()
    };

    let summary = report::write_report(&analysis.resolution, &opts).unwrap();

    assert_eq!(summary.interfaces, 8);
    assert!(!out.path().join("interfaces.json").exists());
}

// ── Dumps ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_snapshot_save_round_trips_through_dump_source() {
    let original = Snapshot::fetch(&DumpSource::new(fixture_dir()))
        .await
        .unwrap();
    let out = tempfile::tempdir().unwrap();
    let dump = DumpSource::new(out.path());

    let written = original.save(&dump).unwrap();
    assert_eq!(written.len(), 2);

    let reloaded = Snapshot::fetch(&dump).await.unwrap();
    assert_eq!(reloaded.port_blocks, original.port_blocks);
    assert_eq!(reloaded.path_attachments, original.path_attachments);
}

#[tokio::test]
async fn test_missing_dump_file_is_reported() {
    let out = tempfile::tempdir().unwrap();
    let err = Snapshot::fetch(&DumpSource::new(out.path()))
        .await
        .unwrap_err();
    assert!(
        matches!(err, fabpath_core::CoreError::Dump { .. }),
        "expected Dump error, got: {err:?}"
    );
}
