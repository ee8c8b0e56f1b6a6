use assert_cmd::Command;
use indoc::indoc;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SDG: &str = indoc! {r#"
    {
      "nodes": [
        { "id": "shop.cart.Cart.add", "class": "shop.cart.Cart" },
        { "id": "shop.cart.Cart.total", "class": "shop.cart.Cart" },
        { "id": "shop.order.Order.place", "class": "shop.order.Order" },
        { "id": "shop.order.Order.cancel", "class": "shop.order.Order" }
      ],
      "edges": [
        { "source": "shop.cart.Cart.add", "target": "shop.cart.Cart.total", "weight": 2, "type": "CALL_DEP" },
        { "source": "shop.order.Order.place", "target": "shop.order.Order.cancel", "weight": 2, "type": "HEAP_DEP" },
        { "source": "shop.order.Order.place", "target": "shop.cart.Cart.total", "weight": 1, "type": "CALL_DEP" }
      ]
    }
"#};

fn write_sdg(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("sdg.json");
    fs::write(&path, SDG).unwrap();
    path
}

fn partmap(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("partmap").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_partition_writes_annotated_nodes() {
    let dir = TempDir::new().unwrap();
    let sdg = write_sdg(dir.path());
    let out = dir.path().join("out");

    partmap(dir.path())
        .arg("partition")
        .arg("-i")
        .arg(&sdg)
        .args(["-k", "2", "--strategy", "random-methods", "-o"])
        .arg(&out)
        .assert()
        .success();

    let partitions = read_json(&out.join("partitions.json"));
    let nodes = partitions["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 4);
    for node in nodes {
        assert!(node["partition"].is_i64());
        assert!(node["centrality"].is_f64());
        assert!(node["modified"].is_boolean());
    }
    assert_eq!(partitions["edges"].as_array().unwrap().len(), 3);
    assert!(out.join("class_partitions.json").is_file());
}

#[test]
fn test_partition_uses_seed_partitions_file() {
    let dir = TempDir::new().unwrap();
    let sdg = write_sdg(dir.path());
    let seeds = dir.path().join("seeds.json");
    fs::write(&seeds, r#"{ "shop.cart.Cart": 7, "shop.order.Order": 8 }"#).unwrap();

    partmap(dir.path())
        .arg("partition")
        .arg("-i")
        .arg(&sdg)
        .arg("-s")
        .arg(&seeds)
        .args(["-k", "2", "--no-class-view"])
        .assert()
        .success();

    let partitions = read_json(&dir.path().join("partitions.json"));
    let label_of = |id: &str| {
        partitions["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .find(|n| n["id"] == id)
            .map(|n| n["partition"].clone())
            .unwrap()
    };
    assert_eq!(label_of("shop.cart.Cart.add"), 7);
    assert_eq!(label_of("shop.order.Order.cancel"), 8);
    assert!(!dir.path().join("class_partitions.json").exists());
}

#[test]
fn test_partition_prints_summary() {
    let dir = TempDir::new().unwrap();
    let sdg = write_sdg(dir.path());

    let output = partmap(dir.path())
        .env("NO_COLOR", "1")
        .arg("partition")
        .arg("-i")
        .arg(&sdg)
        .args(["-k", "2", "--summary"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("package_names"));
}

#[test]
fn test_partition_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    partmap(dir.path())
        .args(["partition", "-i", "missing.json"])
        .assert()
        .failure();
}

#[test]
fn test_partition_rejects_malformed_edge() {
    let dir = TempDir::new().unwrap();
    let sdg = dir.path().join("bad.json");
    fs::write(
        &sdg,
        indoc! {r#"
            {
              "nodes": [ { "id": "a" } ],
              "edges": [ { "source": "a", "target": "b", "weight": 1, "type": "CALL_DEP" } ]
            }
        "#},
    )
    .unwrap();

    let output = partmap(dir.path())
        .arg("partition")
        .arg("-i")
        .arg(&sdg)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("edge"));
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();

    partmap(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".partmap.toml").is_file());

    partmap(dir.path()).arg("init").assert().failure();
    partmap(dir.path()).args(["init", "--force"]).assert().success();
}
