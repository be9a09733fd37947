//! Integration tests for catalog loading and classification.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fv_core::m;
use fv_schedule::{
    FlowClass, PipeCatalog, PipeSchedule, PipeSeries, PipeSystem, ScheduleError, SeriesMode,
    classify, load_catalog_dir,
};

const HEADER: &str = "DN,PipeType,PipeSeries,pOd,kOd,tWdth,minElasticRadii,VpMax12,VpMax16";

fn sample_catalog_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/pipe_types")
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn loads_one_table_per_file() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "DN.csv",
        &format!("{HEADER}\n100,Enkelt,S3,114.3,250,3.6,57,0,0\n100,Twin,S1,114.3,315,3.6,57,0,0\n"),
    );
    write(
        dir.path(),
        "ALUPEX.csv",
        &format!("{HEADER}\n20,Twin,S1,20,90,,0.9,0,0\n"),
    );
    write(dir.path(), "notes.txt", "not a table");

    let catalog = load_catalog_dir(dir.path()).unwrap();
    assert_eq!(catalog.tables().count(), 2);
    assert_eq!(catalog.outer_diameter(PipeSystem::Steel, 100), 114.3);
    assert_eq!(
        catalog.casing_diameter(PipeSystem::Steel, FlowClass::Single, 100, PipeSeries::S3),
        250.0
    );
    assert_eq!(
        catalog.casing_diameter(PipeSystem::AluPex, FlowClass::Twin, 20, PipeSeries::S1),
        90.0
    );
    assert_eq!(catalog.outer_diameter(PipeSystem::CopperFlex, 22), 0.0);
}

#[test]
fn empty_directory_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "readme.md", "# nothing here");
    let err = load_catalog_dir(dir.path()).unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(err, ScheduleError::NoCatalogTables { .. }));
    assert!(err.to_string().contains(&dir.path().display().to_string()));
}

#[test]
fn missing_directory_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent");
    let err = PipeCatalog::load(&missing).unwrap_err();
    assert!(matches!(err, ScheduleError::Io { .. }));
    assert!(err.to_string().contains("absent"));
}

#[test]
fn one_bad_table_fails_the_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "DN.csv", &format!("{HEADER}\n100,Enkelt,S3,114.3,250,,57,0,0\n"));
    write(dir.path(), "CU.csv", "DN,PipeType,PipeSeries,pOd\n22,Twin,S1,22\n");
    let err = load_catalog_dir(dir.path()).unwrap_err();
    assert!(matches!(err, ScheduleError::MissingColumn { .. }));
    assert!(err.to_string().contains("CU.csv"));
}

#[test]
fn sample_catalog_round_trips_stored_values() {
    let catalog = load_catalog_dir(&sample_catalog_dir()).unwrap();
    let steel = catalog.table(PipeSystem::Steel).unwrap();
    for entry in steel.entries() {
        let k = entry.key;
        assert_eq!(catalog.outer_diameter(PipeSystem::Steel, k.dn), entry.outer_diameter_mm);
        assert_eq!(
            catalog.casing_diameter(PipeSystem::Steel, k.flow_class, k.dn, k.series),
            entry.casing_diameter_mm
        );
        assert_eq!(
            catalog.min_elastic_radius(PipeSystem::Steel, k.flow_class, k.dn, k.series),
            entry.min_elastic_radius_m
        );
    }
}

#[test]
fn sample_catalog_labels() {
    let catalog = Arc::new(load_catalog_dir(&sample_catalog_dir()).unwrap());
    let schedule = PipeSchedule::new(catalog);

    let d = classify("XREF|FJV-FREM-DN100").unwrap();
    assert_eq!(
        schedule.pipe_series(&d, m(0.225), SeriesMode::HardFail).unwrap(),
        PipeSeries::S2
    );
    assert_eq!(schedule.label(&d, m(0.25)).unwrap(), "DN100-ø114.3/250");

    let twin = classify("FJV-TWIN-ALUPEX20").unwrap();
    assert_eq!(schedule.label(&twin, m(0.125)).unwrap(), "ALUPEX20-ø20+ø20/125");
    assert!(twin.is_in_situ_bent().unwrap());
}
