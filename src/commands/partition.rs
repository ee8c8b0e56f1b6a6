use crate::cli::PartitionArgs;
use crate::config::{load_config, load_config_from, PartmapConfig};
use crate::io::{self, CLASS_PARTITIONS_FILE, PARTITIONS_FILE};
use crate::partitioner::{PartitionRun, Partitioner};
use crate::rollup::ClassRollup;
use crate::sdg::{load_seed_map, SdgDocument};
use anyhow::{Context, Result};

pub fn handle_partition(args: PartitionArgs) -> Result<()> {
    let run = execute(&args)?;

    if args.summary {
        print!("{}", io::format_summary_terminal(&run.summary, &run.graph));
    }

    Ok(())
}

/// Load inputs, partition, and write results into the output directory.
pub fn execute(args: &PartitionArgs) -> Result<PartitionRun> {
    let config = resolve_config(args)?;
    let settings = args.apply_to(config.partition_settings());
    settings
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid partition settings")?;

    let document = SdgDocument::load(&args.app_dependency_graph)?;
    let mut partitioner = Partitioner::new(settings);
    if let Some(path) = &args.seed_partitions {
        partitioner = partitioner.with_seed_map(load_seed_map(path)?);
    }

    let run = partitioner.run(&document)?;

    io::ensure_dir(&args.output)?;
    io::write_json(&args.output.join(PARTITIONS_FILE), &run.graph)?;

    let rollup = config.rollup_settings();
    if rollup.enabled && !args.no_class_view {
        let centrality = args.class_centrality.unwrap_or(rollup.centrality);
        let classes = ClassRollup::new(centrality).rollup(&run.graph);
        io::write_json(&args.output.join(CLASS_PARTITIONS_FILE), &classes)?;
    }

    Ok(run)
}

fn resolve_config(args: &PartitionArgs) -> Result<PartmapConfig> {
    match &args.config {
        Some(path) => Ok(load_config_from(path)?),
        None => Ok(load_config()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeding::SeedStrategy;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const SDG: &str = r#"{
        "nodes": [
            { "id": "app.a.A.run", "class": "app.a.A" },
            { "id": "app.a.A.load", "class": "app.a.A" },
            { "id": "app.b.B.save", "class": "app.b.B" }
        ],
        "edges": [
            { "source": "app.a.A.run", "target": "app.a.A.load", "weight": 2, "type": "CALL_DEP" },
            { "source": "app.a.A.load", "target": "app.b.B.save", "weight": 1, "type": "CALL_DEP" }
        ]
    }"#;

    fn args_in(dir: &Path) -> PartitionArgs {
        let sdg = dir.join("sdg.json");
        fs::write(&sdg, SDG).unwrap();
        let config = dir.join("partmap.toml");
        fs::write(&config, "").unwrap();
        PartitionArgs {
            app_dependency_graph: sdg,
            max_partitions: Some(2),
            strategy: Some(SeedStrategy::RandomMethods),
            output: dir.join("out"),
            config: Some(config),
            ..PartitionArgs::default()
        }
    }

    #[test]
    fn test_execute_writes_both_views() {
        let dir = TempDir::new().unwrap();
        let args = args_in(dir.path());

        let run = execute(&args).unwrap();

        assert_eq!(run.graph.nodes.len(), 3);
        assert!(dir.path().join("out").join(PARTITIONS_FILE).is_file());
        assert!(dir.path().join("out").join(CLASS_PARTITIONS_FILE).is_file());
    }

    #[test]
    fn test_execute_skips_class_view_when_disabled() {
        let dir = TempDir::new().unwrap();
        let args = PartitionArgs {
            no_class_view: true,
            ..args_in(dir.path())
        };

        execute(&args).unwrap();

        assert!(!dir.path().join("out").join(CLASS_PARTITIONS_FILE).exists());
    }

    #[test]
    fn test_execute_rejects_zero_pass_cap() {
        let dir = TempDir::new().unwrap();
        let args = PartitionArgs {
            max_passes: Some(0),
            ..args_in(dir.path())
        };

        let err = execute(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid partition settings"));
    }
}
