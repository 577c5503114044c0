//! Output layout produced by the writer for whole streams.

use kubectl_save::pipeline::save_stream;
use kubectl_save::test_utils::{ResourceFixture, ketall_yaml, list_yaml, relative_files};
use kubectl_save::writer::{ResourceWriter, WriterOptions};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn save(temp: &TempDir, input: &str) -> usize {
    let writer = ResourceWriter::new(WriterOptions::new(temp.path())).unwrap();
    save_stream(input, &writer).unwrap()
}

#[test]
fn test_list_layout() {
    let temp = TempDir::new().unwrap();
    let resources = [
        ResourceFixture::new("apps/v1", "Deployment", "web").in_namespace("shop"),
        ResourceFixture::new("v1", "Service", "web").in_namespace("shop"),
        ResourceFixture::new("rbac.authorization.k8s.io/v1", "ClusterRole", "system:aggregate-to-view"),
    ];

    let saved = save(&temp, &list_yaml(&resources).unwrap());

    assert_eq!(saved, 3);
    let mut expected: Vec<PathBuf> = resources.iter().map(ResourceFixture::expected_path).collect();
    expected.sort();
    assert_eq!(relative_files(temp.path()).unwrap(), expected);
    assert!(expected.contains(&PathBuf::from(
        "rbac.authorization.k8s.io_v1--ClusterRole/default--system_aggregate-to-view.yaml"
    )));
}

#[test]
fn test_ketall_layout_has_no_wrapper_files() {
    let temp = TempDir::new().unwrap();
    let groups = vec![
        vec![ResourceFixture::pod("a"), ResourceFixture::pod("b")],
        vec![ResourceFixture::new("v1", "ConfigMap", "c").in_namespace("kube-system")],
    ];

    save(&temp, &ketall_yaml(&groups).unwrap());

    assert_eq!(
        relative_files(temp.path()).unwrap(),
        [
            PathBuf::from("v1--ConfigMap/kube-system--c.yaml"),
            PathBuf::from("v1--Pod/default--a.yaml"),
            PathBuf::from("v1--Pod/default--b.yaml"),
        ]
    );
}

#[test]
fn test_written_file_is_the_resource() {
    let temp = TempDir::new().unwrap();
    let pod = ResourceFixture::pod("foo");

    save(&temp, &pod.to_yaml().unwrap());

    let written = fs::read_to_string(temp.path().join(pod.expected_path())).unwrap();
    let written: serde_yaml::Mapping = serde_yaml::from_str(&written).unwrap();
    assert_eq!(written, pod.to_mapping());
}

#[cfg(unix)]
#[test]
fn test_directories_are_traversable() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    save(&temp, &ResourceFixture::pod("foo").to_yaml().unwrap());

    let mode = fs::metadata(temp.path().join("v1--Pod")).unwrap().permissions().mode();
    // umask may clear group/other write bits but never owner rwx
    assert_eq!(mode & 0o700, 0o700);
}
