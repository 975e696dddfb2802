//! Integration tests for SonataExtra

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use sonata_extra::assets::{JsMinifier, Minify};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
        [blocks.header]
        css = ["/a.css", "/b.css"]
        css_inline = ["body {\n  margin: 0;\n}\n"]

        [blocks.footer]
        js = [{ path = "/app.js", defer = true }, { path = "/legacy.js" }]
        js_inline = ["x", "y"]
    "#;

    /// Isolated config, cache dir and manifest
    struct Workspace {
        temp: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let config = format!(
                "[cache]\ndir = \"{}\"\n",
                temp.path().join("cache").display()
            );
            fs::write(temp.path().join("config.toml"), config).unwrap();
            fs::write(temp.path().join("assets.toml"), MANIFEST).unwrap();
            Self { temp }
        }

        fn path(&self, name: &str) -> PathBuf {
            self.temp.path().join(name)
        }

        fn cmd(&self) -> Command {
            let mut cmd = cargo_bin_cmd!("sonata-extra");
            cmd.env_remove("SONATA_EXTRA_ENV")
                .env("SONATA_EXTRA_CONFIG", self.path("config.toml"));
            cmd
        }

        fn cache_entries(&self) -> usize {
            let dir = self.path("cache");
            if !dir.exists() {
                return 0;
            }
            fs::read_dir(dir).unwrap().count()
        }
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("sonata-extra")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Asset aggregation"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("sonata-extra")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("sonata-extra"));
    }

    #[test]
    fn render_css_links_in_order() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("render")
            .arg(ws.path("assets.toml"))
            .args(["--block", "header", "--part", "css"])
            .assert()
            .success()
            .stdout(
                "<link href=\"/a.css\" rel=\"stylesheet\"><link href=\"/b.css\" rel=\"stylesheet\">\n",
            );
    }

    #[test]
    fn render_scripts_with_defer() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("render")
            .arg(ws.path("assets.toml"))
            .args(["--block", "footer", "--part", "js"])
            .assert()
            .success()
            .stdout("<script src=\"/app.js\" defer></script><script src=\"/legacy.js\"></script>\n");
    }

    #[test]
    fn render_compressed_css_is_cached() {
        let ws = Workspace::new();
        for _ in 0..2 {
            ws.cmd()
                .arg("render")
                .arg(ws.path("assets.toml"))
                .args(["--block", "header", "--part", "css-inline", "--compress"])
                .assert()
                .success()
                .stdout("<style>body{margin:0}</style>\n");
        }
        assert_eq!(ws.cache_entries(), 1);
    }

    #[test]
    fn render_inline_js_unminified_outside_production() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("render")
            .arg(ws.path("assets.toml"))
            .args(["--block", "footer", "--part", "js-inline", "--compress"])
            .assert()
            .success()
            .stdout("<script>xy</script>\n");
        assert_eq!(ws.cache_entries(), 0);
    }

    #[test]
    fn render_inline_js_minified_in_production() {
        let ws = Workspace::new();
        let minified = JsMinifier::new().minify("xy").unwrap();

        ws.cmd()
            .arg("render")
            .arg(ws.path("assets.toml"))
            .args(["--block", "footer", "--part", "js-inline", "--compress"])
            .args(["--env", "prod"])
            .assert()
            .success()
            .stdout(format!("<script>{minified}</script>\n"));
        assert_eq!(ws.cache_entries(), 1);
    }

    #[test]
    fn render_unknown_block_is_empty() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("render")
            .arg(ws.path("assets.toml"))
            .args(["--block", "sidebar"])
            .assert()
            .success()
            .stdout("");
    }

    #[test]
    fn render_missing_manifest() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("render")
            .arg(ws.path("missing.toml"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Asset manifest not found"));
    }

    #[test]
    fn render_reports_minifier_failure() {
        let ws = Workspace::new();
        fs::write(
            ws.path("broken.toml"),
            "[blocks.header]\ncss_inline = [\"..broken { color: red }\"]\n",
        )
        .unwrap();

        ws.cmd()
            .arg("render")
            .arg(ws.path("broken.toml"))
            .arg("--compress")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to minify inline css"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn cache_clear_removes_entries() {
        let ws = Workspace::new();
        ws.cmd()
            .arg("render")
            .arg(ws.path("assets.toml"))
            .arg("--compress")
            .assert()
            .success();
        assert_eq!(ws.cache_entries(), 1);

        ws.cmd()
            .args(["cache", "clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cleared 1 entry"));
        assert_eq!(ws.cache_entries(), 0);
    }

    #[test]
    fn cache_path_uses_config() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cache"));
    }

    #[test]
    fn config_show() {
        let ws = Workspace::new();
        ws.cmd()
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"))
            .stdout(predicate::str::contains("environment = \"dev\""));
    }

    #[test]
    fn config_init_writes_file() {
        let ws = Workspace::new();
        let path = ws.path("fresh").join("config.toml");

        cargo_bin_cmd!("sonata-extra")
            .arg("--config")
            .arg(&path)
            .args(["config", "init"])
            .assert()
            .success();

        assert!(path.exists());
    }
}
