//! CLI integration tests for qtforge.
//!
//! These tests run the binary end to end: inputs from flags, profiles and
//! config files, outputs on stdout and diagnostics on stderr.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the qtforge binary command, isolated from the user's config and
/// compiler environment.
fn qtforge(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("qtforge").unwrap();
    cmd.env("HOME", home)
        .env_remove("CC")
        .env_remove("CXX")
        .current_dir(home);
    cmd
}

fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

const LINUX: &[&str] = &[
    "--os",
    "Linux",
    "--arch",
    "x86_64",
    "--compiler",
    "gcc",
    "--compiler-version",
    "11",
    "--build-type",
    "Release",
];

const MANIFEST: &str = r#"[submodule "qtbase"]
	path = qtbase
	status = essential
[submodule "qtsvg"]
	depends = qtbase
	status = addon
[submodule "qtdeclarative"]
	depends = qtbase qtsvg
	status = addon
[submodule "qtquickcontrols"]
	depends = qtdeclarative
	status = obsolete
"#;

// ============================================================================
// qtforge configure
// ============================================================================

#[test]
fn test_configure_native_linux() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("configure")
        .args(LINUX)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("-static\n-release\n"))
        .stdout(predicate::str::contains("-platform linux-g++\n"))
        .stdout(predicate::str::contains("-skip qtwebengine\n"));
}

#[test]
fn test_configure_json() {
    let tmp = temp_dir();

    let output = qtforge(tmp.path())
        .arg("configure")
        .args(LINUX)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["platform"], "linux-g++");
    assert_eq!(json["make_program"], "make");
    assert_eq!(json["args"][0], "-static");
}

#[test]
fn test_configure_modules_from_manifest() {
    let tmp = temp_dir();
    fs::write(tmp.path().join(".gitmodules"), MANIFEST).unwrap();

    qtforge(tmp.path())
        .arg("configure")
        .args(LINUX)
        .args(["--manifest", ".gitmodules", "--module", "qtdeclarative"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-skip qtsvg\n").not())
        .stdout(predicate::str::contains("-skip qtdeclarative\n").not())
        .stdout(predicate::str::contains("-skip qtcharts\n"));
}

#[test]
fn test_configure_compilers_from_env() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("configure")
        .args(LINUX)
        .env("CC", "/usr/bin/gcc-11")
        .env("CXX", "/usr/bin/g++-11")
        .assert()
        .success()
        .stdout(predicate::str::contains("QMAKE_CC=\"/usr/bin/gcc-11\""))
        .stdout(predicate::str::contains("QMAKE_LINK_SHLIB=\"/usr/bin/g++-11\""));
}

#[test]
fn test_configure_requires_settings() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("configure")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no host settings given"));
}

#[test]
fn test_configure_rejects_invalid_configuration() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("configure")
        .args(LINUX)
        .args(["--opengl", "dynamic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dynamic OpenGL is supported only on Windows"));
}

#[test]
fn test_configure_unknown_module() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("configure")
        .args(LINUX)
        .args(["--module", "qtnotreal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown module `qtnotreal`"));
}

#[test]
fn test_configure_unresolved_platform_warns() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("configure")
        .args(["--os", "Linux", "--arch", "mips64", "--compiler", "gcc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-platform").not())
        .stderr(predicate::str::contains("host not supported"));
}

#[test]
fn test_configure_cross_build_from_profile() {
    let tmp = temp_dir();
    let profile = tmp.path().join("android.toml");
    fs::write(
        &profile,
        r#"
[settings]
os = "Android"
arch = "armv8"
compiler = "clang"
compiler_version = "12"
os_api_level = 24
build_type = "Release"

[settings.build]
os = "Linux"
arch = "x86_64"

[options]
cross_compile = "aarch64-linux-android-"
opengl = "es2"
"#,
    )
    .unwrap();

    qtforge(tmp.path())
        .arg("configure")
        .args(["--profile", "android.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-xplatform android-clang\n"))
        .stdout(predicate::str::contains("-android-ndk-platform android-24\n"))
        .stdout(predicate::str::contains("-android-abis arm64-v8a\n"))
        .stdout(predicate::str::contains(
            "-device-option CROSS_COMPILE=aarch64-linux-android-\n",
        ));
}

#[test]
fn test_configure_cross_build_needs_prefix() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("configure")
        .args(["--os", "Linux", "--arch", "armv8", "--compiler", "gcc"])
        .args(["--build-os", "Linux", "--build-arch", "x86_64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a cross_compile prefix"));
}

#[test]
fn test_configure_cross_build_unknown_platform_fails() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("configure")
        .args(["--os", "Linux", "--arch", "riscv64", "--compiler", "gcc"])
        .args(["--build-os", "Linux", "--build-arch", "x86_64"])
        .args(["--cross-compile", "riscv64-linux-gnu-"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains(
            "no qmake platform is known for cross-building to Linux gcc riscv64",
        ))
        .stderr(predicate::str::contains("--device"));

    qtforge(tmp.path())
        .arg("configure")
        .args(["--os", "Linux", "--arch", "riscv64", "--compiler", "gcc"])
        .args(["--build-os", "Linux", "--build-arch", "x86_64"])
        .args(["--cross-compile", "riscv64-linux-gnu-"])
        .args(["--device", "linux-generic-g++"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-device linux-generic-g++\n"));
}

#[test]
fn test_malformed_project_config_fails() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join(".qtforge")).unwrap();
    fs::write(
        tmp.path().join(".qtforge/config.toml"),
        "[options]\ncross_compile = 42\n",
    )
    .unwrap();

    qtforge(tmp.path())
        .arg("configure")
        .args(LINUX)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn test_project_config_is_applied() {
    let tmp = temp_dir();
    fs::create_dir_all(tmp.path().join(".qtforge")).unwrap();
    fs::write(
        tmp.path().join(".qtforge/config.toml"),
        "[options]\nshared = true\n",
    )
    .unwrap();

    qtforge(tmp.path())
        .arg("configure")
        .args(LINUX)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("-shared\n"));

    // Flags win over config files.
    qtforge(tmp.path())
        .arg("configure")
        .args(LINUX)
        .arg("--static")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("-static\n"));
}

// ============================================================================
// qtforge components
// ============================================================================

#[test]
fn test_components_text() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("components")
        .args(LINUX)
        .assert()
        .success()
        .stdout(predicate::str::contains("qtCore (Qt5::Core, library)\n"))
        .stdout(predicate::str::contains(
            "  build module: lib/cmake/Qt5Core/conan_qt_core_extras.cmake\n",
        ))
        .stdout(predicate::str::contains(
            "qtQXcbIntegrationPlugin (Qt5::QXcbIntegrationPlugin, plugin (platforms))\n",
        ));
}

#[test]
fn test_components_json() {
    let tmp = temp_dir();

    let output = qtforge(tmp.path())
        .arg("components")
        .args(LINUX)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["components"]["components"]["qtCore"]["libs"][0], "Qt5Core");
    assert_eq!(
        json["build_modules"]["qtCore"][0],
        "lib/cmake/Qt5Core/conan_qt_core_extras.cmake"
    );
}

#[test]
fn test_components_dot() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("components")
        .args(LINUX)
        .arg("--dot")
        .assert()
        .success()
        .stdout(predicate::str::contains("digraph"))
        .stdout(predicate::str::contains("qtWidgets"));
}

#[test]
fn test_components_emit_snippets() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .arg("components")
        .args(LINUX)
        .args(["--emit-snippets", "out"])
        .assert()
        .success();

    let extras =
        fs::read_to_string(tmp.path().join("out/lib/cmake/Qt5Core/conan_qt_core_extras.cmake"))
            .unwrap();
    assert!(extras.contains("set(QT_VERSION_MAJOR 5)"));
    assert!(tmp
        .path()
        .join("out/lib/cmake/Qt5Gui/conan_qt_qt5_guiprivate.cmake")
        .is_file());
    assert_eq!(
        fs::read_to_string(tmp.path().join("out/bin/qt.conf")).unwrap(),
        "[Paths]\nPrefix = ..\n"
    );
}

#[test]
fn test_components_installed_prefix() {
    let tmp = temp_dir();
    let prefix = tmp.path().join("pkg");
    fs::create_dir_all(prefix.join("lib/cmake/Qt5Widgets")).unwrap();
    fs::write(prefix.join("lib/cmake/Qt5Widgets/Qt5WidgetsMacros.cmake"), "").unwrap();

    qtforge(tmp.path())
        .arg("components")
        .args(LINUX)
        .args(["--installed", "pkg"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "  build module: lib/cmake/Qt5Widgets/Qt5WidgetsMacros.cmake\n",
        ));
}

// ============================================================================
// qtforge xplatform
// ============================================================================

#[test]
fn test_xplatform_resolves() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .args(["xplatform", "--os", "Linux", "--compiler", "gcc", "--arch", "armv7"])
        .assert()
        .success()
        .stdout("linux-arm-gnueabi-g++\n");
}

#[test]
fn test_xplatform_unknown_is_not_fatal() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .args(["xplatform", "--os", "Linux", "--compiler", "gcc", "--arch", "unknown_arch"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("host not supported"));
}

// ============================================================================
// qtforge check
// ============================================================================

#[test]
fn test_check_valid_manifest() {
    let tmp = temp_dir();
    fs::write(tmp.path().join(".gitmodules"), MANIFEST).unwrap();

    qtforge(tmp.path())
        .args(["check", ".gitmodules", "--module", "qtdeclarative"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qtbase (required)\n"))
        .stdout(predicate::str::contains("qtsvg (optional) -> qtbase\n"))
        .stdout(predicate::str::contains("qtquickcontrols").not())
        .stdout(predicate::str::contains("enabled: qtdeclarative qtsvg\n"));
}

#[test]
fn test_check_rejects_unknown_module() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join(".gitmodules"),
        "[submodule \"qtbase\"]\n\tstatus = essential\n[submodule \"qtmystery\"]\n\tstatus = addon\n",
    )
    .unwrap();

    qtforge(tmp.path())
        .args(["check", ".gitmodules"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown module `qtmystery`"));
}

#[test]
fn test_check_rejects_repeated_key() {
    let tmp = temp_dir();
    fs::write(
        tmp.path().join(".gitmodules"),
        "[submodule \"qtbase\"]\n\tstatus = essential\n\tstatus = obsolete\n",
    )
    .unwrap();

    qtforge(tmp.path())
        .args(["check", ".gitmodules"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sets `status` twice"));
}

#[test]
fn test_check_empty_manifest() {
    let tmp = temp_dir();
    fs::write(tmp.path().join(".gitmodules"), "# nothing here\n").unwrap();

    qtforge(tmp.path())
        .args(["check", ".gitmodules"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no submodule sections"));
}

// ============================================================================
// qtforge identity / completions
// ============================================================================

#[test]
fn test_identity_ignores_sysroot() {
    let tmp = temp_dir();

    let plain = qtforge(tmp.path())
        .arg("identity")
        .args(LINUX)
        .output()
        .unwrap();
    let with_sysroot = qtforge(tmp.path())
        .arg("identity")
        .args(LINUX)
        .args(["--sysroot", "/opt/sysroot"])
        .output()
        .unwrap();
    let shared = qtforge(tmp.path())
        .arg("identity")
        .args(LINUX)
        .arg("--shared")
        .output()
        .unwrap();

    assert!(plain.status.success());
    assert_eq!(plain.stdout.len(), 65);
    assert_eq!(plain.stdout, with_sysroot.stdout);
    assert_ne!(plain.stdout, shared.stdout);
}

#[test]
fn test_completions() {
    let tmp = temp_dir();

    qtforge(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qtforge"));
}
