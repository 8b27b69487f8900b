//! Angular

use super::major;
use crate::error::Result;
use crate::install::{shell_arg, InstallCommandSet, InstallationStrategy, ProjectTarget, Script};
use crate::templates::ConfigWriter;
use serde_json::{json, Value};

const MAIN_TS: &str = r#"import { bootstrapApplication } from '@angular/platform-browser';
import { AppComponent } from './app/app.component';

bootstrapApplication(AppComponent).catch((err) => console.error(err));
"#;

const APP_COMPONENT: &str = r#"import { Component } from '@angular/core';

@Component({
  selector: 'app-root',
  standalone: true,
  template: '<h1>Welcome to Angular</h1>',
})
export class AppComponent {}
"#;

const STYLES: &str = "/* Global styles */\n";

fn index_html(title: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{}</title>
  <base href="/">
  <meta name="viewport" content="width=device-width, initial-scale=1">
</head>
<body>
  <app-root></app-root>
</body>
</html>
"#,
        title
    )
}

fn workspace_config(project: &str) -> Value {
    json!({
        "$schema": "./node_modules/@angular/cli/lib/config/schema.json",
        "version": 1,
        "newProjectRoot": "projects",
        "projects": {
            project: {
                "projectType": "application",
                "root": "",
                "sourceRoot": "src",
                "prefix": "app",
                "architect": {
                    "build": {
                        "builder": "@angular-devkit/build-angular:application",
                        "options": {
                            "outputPath": format!("dist/{}", project),
                            "index": "src/index.html",
                            "browser": "src/main.ts",
                            "tsConfig": "tsconfig.json",
                            "styles": ["src/styles.css"]
                        }
                    },
                    "serve": {
                        "builder": "@angular-devkit/build-angular:dev-server",
                        "options": { "buildTarget": format!("{}:build", project) }
                    }
                }
            }
        }
    })
}

pub(super) fn install_commands(version: &str, target: &ProjectTarget) -> InstallCommandSet {
    let name = target.package_name();
    let m = major(version);

    InstallCommandSet::new()
        .with_global(Script::new([
            format!("npm install -g @angular/cli@{}", version),
            format!(
                "ng new {} --directory {} --defaults --skip-git",
                name,
                shell_arg(&target.path.to_string_lossy())
            ),
        ]))
        .with_local(Script::new([format!(
            "npx --yes -p @angular/cli@{} ng new {} --directory . --defaults --skip-git",
            version, name
        )]))
        .with_manual(Script::new([
            format!(
                "npm install @angular/core@{m} @angular/common@{m} @angular/compiler@{m} @angular/platform-browser@{m} rxjs zone.js tslib"
            ),
            format!(
                "npm install --save-dev @angular/cli@{} @angular-devkit/build-angular@{m} @angular/compiler-cli@{m} typescript",
                version
            ),
        ]))
}

pub(super) fn setup_config(
    writer: &mut ConfigWriter,
    target: &ProjectTarget,
    strategy: InstallationStrategy,
) -> Result<()> {
    writer.patch_package_json(
        &[("name", json!(target.package_name())), ("private", json!(true))],
        &[
            ("ng", "ng"),
            ("start", "ng serve"),
            ("build", "ng build"),
            ("watch", "ng build --watch --configuration development"),
        ],
    )?;

    if strategy != InstallationStrategy::Manual {
        return Ok(());
    }

    let workspace = serde_json::to_string_pretty(&workspace_config(&target.package_name()))
        .map_err(|source| crate::error::SetupError::Json {
            path: target.path.join("angular.json"),
            source,
        })?;
    writer.write_if_absent("angular.json", &format!("{}\n", workspace))?;
    writer.patch_json(
        "tsconfig.json",
        &[
            ("compilerOptions.outDir", json!("./dist/out-tsc")),
            ("compilerOptions.strict", json!(true)),
            ("compilerOptions.experimentalDecorators", json!(true)),
            ("compilerOptions.moduleResolution", json!("bundler")),
            ("compilerOptions.target", json!("ES2022")),
            ("compilerOptions.module", json!("ES2022")),
            ("compilerOptions.lib", json!(["ES2022", "dom"])),
            ("compilerOptions.skipLibCheck", json!(true)),
            ("files", json!(["src/main.ts"])),
        ],
    )?;
    writer.write_if_absent("src/main.ts", MAIN_TS)?;
    writer.write_if_absent("src/index.html", &index_html(&target.name))?;
    writer.write_if_absent("src/styles.css", STYLES)?;
    writer.write_if_absent("src/app/app.component.ts", APP_COMPONENT)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_generates_into_current_directory() {
        let target = ProjectTarget::resolve(std::path::Path::new("/work"), "Admin Panel");
        let commands = install_commands("17.3.8", &target);
        let local = commands.get(InstallationStrategy::Local).unwrap();
        assert_eq!(
            local.steps(),
            ["npx --yes -p @angular/cli@17.3.8 ng new admin-panel --directory . --defaults --skip-git"]
        );
    }

    #[test]
    fn test_manual_pins_framework_major() {
        let target = ProjectTarget::resolve(std::path::Path::new("/work"), "app");
        let commands = install_commands("17.3.8", &target);
        let manual = commands.get(InstallationStrategy::Manual).unwrap();
        assert!(manual.steps()[0].contains("@angular/core@17 "));
        assert!(manual.steps()[1].contains("@angular/cli@17.3.8"));
    }

    #[test]
    fn test_manual_setup_writes_workspace() {
        let tmp = tempfile::tempdir().unwrap();
        let target = ProjectTarget::resolve(tmp.path(), "dash");
        std::fs::create_dir_all(&target.path).unwrap();
        let mut writer = ConfigWriter::new(&target.path);

        setup_config(&mut writer, &target, InstallationStrategy::Manual).unwrap();

        let workspace: Value = serde_json::from_str(
            &std::fs::read_to_string(target.path.join("angular.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            workspace["projects"]["dash"]["architect"]["build"]["options"]["outputPath"],
            "dist/dash"
        );
        assert!(target.path.join("src/app/app.component.ts").exists());
    }
}
