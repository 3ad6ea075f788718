//! Drives the `tf-inventory` binary against a stub `terraform` executable.
#![cfg(unix)]

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

const TWO_GROUPS: &str = r#"{
    "primary_ec2_public_ips": {"sensitive": false, "type": ["tuple", ["string", "string"]], "value": ["10.0.0.1", "10.0.0.2"]},
    "secondary_ec2_public_ips": {"sensitive": false, "type": ["tuple", ["string"]], "value": ["10.0.1.1"]}
}"#;
const TWO_GROUPS_INI: &str = "[primary]\n10.0.0.1\n10.0.0.2\n\n[secondary]\n10.0.1.1\n";

// Writing an executable while another test thread forks can leave the script busy (ETXTBSY), so
// these tests run one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

struct Project {
    _guard: MutexGuard<'static, ()>,
    _dir: TempDir,
    root: PathBuf,
}

impl Project {
    fn new() -> Self {
        let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        // The binary reports paths based on getcwd(), which has symlinks resolved.
        let root = dir.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("terraform")).unwrap();
        Project {
            _guard: guard,
            _dir: dir,
            root,
        }
    }

    fn path(&self) -> &Path {
        &self.root
    }

    fn inventory(&self) -> PathBuf {
        self.path().join("ansible").join("inventory.ini")
    }

    /// Installs a stub terraform that prints `outputs.json` from its working directory, and
    /// refuses to run with any arguments other than `output -json`.
    fn terraform_outputs(&self, json: &str) -> PathBuf {
        fs::write(self.path().join("terraform").join("outputs.json"), json).unwrap();
        self.stub(
            r#"[ "$1" = "output" ] && [ "$2" = "-json" ] || { echo "bad args: $*" >&2; exit 64; }
cat outputs.json"#,
        )
    }

    fn stub(&self, body: &str) -> PathBuf {
        let path = self.path().join("fake-terraform");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn cmd(&self, terraform: &Path) -> Command {
        let mut cmd = Command::cargo_bin("tf-inventory").unwrap();
        cmd.current_dir(self.path()).arg("--terraform-bin").arg(terraform);
        cmd
    }
}

#[test]
fn writes_inventory() {
    let project = Project::new();
    let terraform = project.terraform_outputs(TWO_GROUPS);

    let assert = project.cmd(&terraform).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("Fetching Terraform outputs"));
    let expected_path = project.inventory();
    assert!(stdout.contains(&format!(
        "Inventory file generated successfully at: {}",
        expected_path.display()
    )));
    assert_eq!(fs::read_to_string(&expected_path).unwrap(), TWO_GROUPS_INI);
}

#[test]
fn missing_outputs_give_empty_groups() {
    let project = Project::new();
    let terraform = project.terraform_outputs("{}");

    project.cmd(&terraform).assert().success();
    assert_eq!(
        fs::read_to_string(project.inventory()).unwrap(),
        "[primary]\n\n[secondary]\n"
    );

    let terraform =
        project.terraform_outputs(r#"{"secondary_ec2_public_ips": {"value": ["10.9.9.9"]}}"#);
    project.cmd(&terraform).assert().success();
    assert_eq!(
        fs::read_to_string(project.inventory()).unwrap(),
        "[primary]\n\n[secondary]\n10.9.9.9\n"
    );
}

#[test]
fn repeated_runs_are_identical() {
    let project = Project::new();
    let terraform = project.terraform_outputs(TWO_GROUPS);

    project.cmd(&terraform).assert().success();
    let first = fs::read(project.inventory()).unwrap();
    project.cmd(&terraform).assert().success();
    let second = fs::read(project.inventory()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn overwrites_previous_inventory() {
    let project = Project::new();
    let terraform = project.terraform_outputs(TWO_GROUPS);
    fs::create_dir_all(project.path().join("ansible")).unwrap();
    fs::write(
        project.inventory(),
        "[primary]\n1.1.1.1\n2.2.2.2\n3.3.3.3\n\n[secondary]\n4.4.4.4\n5.5.5.5\n[extra]\nhost\n",
    )
    .unwrap();

    project.cmd(&terraform).assert().success();
    assert_eq!(fs::read_to_string(project.inventory()).unwrap(), TWO_GROUPS_INI);
}

#[test]
fn upstream_failure_leaves_inventory_alone() {
    let project = Project::new();
    let terraform = project.stub("echo 'Error: No outputs found' >&2\nexit 1");

    let assert = project.cmd(&terraform).assert().code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Failed to fetch Terraform output"));
    assert!(stderr.contains("No outputs found"));
    assert!(!project.inventory().exists());

    fs::create_dir_all(project.path().join("ansible")).unwrap();
    fs::write(project.inventory(), "untouched\n").unwrap();
    project.cmd(&terraform).assert().code(1);
    assert_eq!(fs::read_to_string(project.inventory()).unwrap(), "untouched\n");
}

#[test]
fn terraform_missing() {
    let project = Project::new();

    project
        .cmd(&project.path().join("no-terraform-here"))
        .assert()
        .code(1);
    assert!(!project.inventory().exists());
}

#[test]
fn malformed_output() {
    let project = Project::new();
    let terraform = project.stub("echo 'this is not json'");

    let assert = project.cmd(&terraform).assert().code(2);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("not a JSON object"));
    assert!(!project.inventory().exists());
}

#[test]
fn custom_paths_and_stdout() {
    let project = Project::new();
    fs::write(project.path().join("saved.json"), TWO_GROUPS).unwrap();

    let mut cmd = Command::cargo_bin("tf-inventory").unwrap();
    cmd.current_dir(project.path())
        .args(["--from-file", "saved.json", "--stdout"])
        .assert()
        .success()
        .stdout(TWO_GROUPS_INI);
    assert!(!project.path().join("ansible").exists());

    let mut cmd = Command::cargo_bin("tf-inventory").unwrap();
    cmd.current_dir(project.path())
        .args(["--from-file", "saved.json", "--output", "out/hosts.ini"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(project.path().join("out").join("hosts.ini")).unwrap(),
        TWO_GROUPS_INI
    );
}
