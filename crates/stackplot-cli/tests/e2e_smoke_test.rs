use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use stackplot::StackplotError;
use stackplot_cli::{Args, run};

/// Sample inputs covering every data and reference reader
const FIXTURES: &[(&str, &str)] = &[
    (
        "scan.xy",
        "# 2theta intensity\n10.0 1.0\n15.0 3.0\n20.0 9.0\n25.0 2.0\n30.0 4.0\n",
    ),
    (
        "scan.csv",
        "Instrument: lab\nangle,counts\n10.0,2.0\n15.0,5.0\n20.0,1.0\n25.0,6.0\n",
    ),
    (
        "pdf.gr",
        "[DEFAULT]\nversion = 1\n#### start data\n#S 1\n#L r($\\AA$)  G($\\AA^{-2}$)\n1.0 0.1\n2.0 0.9\n3.0 -0.2\n",
    ),
    (
        "quartz.csv",
        "h,k,l,2Theta (°),I var\n1,0,0,20.8,22\n1,0,1,26.6,100\n1,1,0,36.5,8\n",
    ),
    ("lines.hkl", "12.5\n18.0\n27.1\n"),
    ("simulated.chi", "10 0\n11 2\n12 7\n13 2\n14 0\n15 3\n16 9\n17 1\n"),
];

fn write_fixtures(dir: &Path) -> Vec<PathBuf> {
    FIXTURES
        .iter()
        .map(|(name, contents)| {
            let path = dir.join(name);
            fs::write(&path, contents).expect("Failed to write fixture");
            path
        })
        .collect()
}

fn args(output: &Path) -> Args {
    Args {
        project: None,
        data: Vec::new(),
        refs: Vec::new(),
        directives: None,
        output: output.to_string_lossy().to_string(),
        config: None,
        seed: Some(7),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_file_lists() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let files = write_fixtures(temp_dir.path());
    let output = temp_dir.path().join("lists.svg");

    let directives = temp_dir.path().join("plot.txt");
    fs::write(
        &directives,
        "offset = 1.5\ntitle = Smoke test\nlegendpos = outside\ncolormap = viridis\n",
    )
    .unwrap();

    let mut args = args(&output);
    args.data = files[..3].to_vec();
    args.refs = files[3..].to_vec();
    args.directives = Some(directives);

    let plot = run(&args).expect("Run failed");

    assert!(plot.report().is_empty(), "{:?}", plot.report().summary());
    assert_eq!(plot.scene().curves.len(), 3);
    assert_eq!(plot.scene().marks.len(), 3);

    let svg = fs::read_to_string(&output).expect("Output was not written");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Smoke test"));
}

#[test]
fn e2e_smoke_test_first_data_file_on_top() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let files = write_fixtures(temp_dir.path());
    let output = temp_dir.path().join("order.svg");

    let mut args = args(&output);
    args.data = files[..2].to_vec();

    let plot = run(&args).expect("Run failed");

    let curves = &plot.scene().curves;
    let lowest_of_first = curves[0].points.iter().map(|p| p.1).fold(f64::MAX, f64::min);
    let highest_of_second = curves[1].points.iter().map(|p| p.1).fold(f64::MIN, f64::max);
    assert!(lowest_of_first > highest_of_second);
}

#[test]
fn e2e_smoke_test_png_output() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let files = write_fixtures(temp_dir.path());
    let output = temp_dir.path().join("plot.PNG");

    let directives = temp_dir.path().join("plot.txt");
    fs::write(&directives, "figsize = 4, 3\nexport_dpi = 100\nxlim = 30, 10\n").unwrap();

    let mut args = args(&output);
    args.data = files[..1].to_vec();
    args.refs = files[3..4].to_vec();
    args.directives = Some(directives);

    let plot = run(&args).expect("Run failed");
    assert!(plot.scene().x_axis.limits.is_some_and(|l| l.is_inverted()));

    let bytes = fs::read(&output).expect("Output was not written");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    assert_eq!((width, height), (400, 300));
}

#[test]
fn e2e_smoke_test_unsupported_output_format() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let files = write_fixtures(temp_dir.path());

    for name in ["plot.pdf", "plot"] {
        let output = temp_dir.path().join(name);
        let mut args = args(&output);
        args.data = files[..1].to_vec();

        let err = run(&args).unwrap_err();
        assert!(matches!(err, StackplotError::Export(_)));
        assert!(err.to_string().contains("Unsupported output format"));
        assert!(!output.exists());
    }
}

#[test]
fn e2e_smoke_test_project_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let files = write_fixtures(temp_dir.path());
    let output = temp_dir.path().join("project.svg");

    let project = temp_dir.path().join("project.json");
    let json = format!(
        r#"{{
            "data_files": [{data:?}],
            "ref_files": [{reference:?}],
            "commands": "figsize = 6, 4\nlegend = off",
            "custom_names": {{ {data:?}: "Calcined" }}
        }}"#,
        data = files[0].to_string_lossy(),
        reference = files[3].to_string_lossy(),
    );
    fs::write(&project, json).unwrap();

    let mut args = args(&output);
    args.project = Some(project);

    let plot = run(&args).expect("Run failed");

    assert_eq!(plot.scene().curves[0].label, "Calcined");
    assert!(plot.scene().legend.is_none());
    assert!(output.exists());
}

#[test]
fn e2e_smoke_test_skipped_files_do_not_fail() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let files = write_fixtures(temp_dir.path());
    let output = temp_dir.path().join("partial.svg");

    let broken = temp_dir.path().join("broken.xy");
    fs::write(&broken, "header\nnot a number\n").unwrap();

    let mut args = args(&output);
    args.data = vec![files[0].clone(), broken.clone()];
    args.refs = vec![temp_dir.path().join("missing.csv")];

    let plot = run(&args).expect("Run failed");

    assert_eq!(plot.scene().curves.len(), 1);
    assert_eq!(plot.report().len(), 2);
    assert!(output.exists());
}

#[test]
fn e2e_smoke_test_error_cases() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("error.svg");

    let err = run(&args(&output)).unwrap_err();
    assert!(matches!(err, StackplotError::NoInput));

    let project = temp_dir.path().join("bad.json");
    fs::write(&project, "{ \"data_files\": ").unwrap();
    let mut bad_project = args(&output);
    bad_project.project = Some(project);
    assert!(matches!(
        run(&bad_project).unwrap_err(),
        StackplotError::Project { .. }
    ));

    let mut missing_config = args(&output);
    missing_config.data = write_fixtures(temp_dir.path())[..1].to_vec();
    missing_config.config = Some(
        temp_dir
            .path()
            .join("missing.toml")
            .to_string_lossy()
            .to_string(),
    );
    assert!(run(&missing_config).is_err());

    assert!(!output.exists());
}
