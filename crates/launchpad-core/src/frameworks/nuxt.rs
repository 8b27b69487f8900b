//! Nuxt

use super::major;
use crate::error::Result;
use crate::install::{InstallCommandSet, InstallationStrategy, ProjectTarget, Script};
use crate::templates::ConfigWriter;
use serde_json::json;

const NUXT_CONFIG: &str = r#"// https://nuxt.com/docs/api/configuration/nuxt-config
export default defineNuxtConfig({
  devtools: { enabled: true },
});
"#;

const APP_VUE: &str = r#"<template>
  <div>
    <h1>Welcome to Nuxt</h1>
  </div>
</template>
"#;

pub(super) fn install_commands(version: &str) -> InstallCommandSet {
    InstallCommandSet::new()
        .with_local(Script::new([
            format!(
                "npx --yes nuxi@{} init . --packageManager npm --gitInit false",
                version
            ),
            "npm install".to_string(),
        ]))
        .with_manual(Script::new([format!(
            "npm install nuxt@{} vue vue-router",
            major(version)
        )]))
}

pub(super) fn setup_config(
    writer: &mut ConfigWriter,
    target: &ProjectTarget,
    strategy: InstallationStrategy,
) -> Result<()> {
    writer.patch_package_json(
        &[
            ("name", json!(target.package_name())),
            ("private", json!(true)),
            ("type", json!("module")),
        ],
        &[
            ("dev", "nuxt dev"),
            ("build", "nuxt build"),
            ("generate", "nuxt generate"),
            ("preview", "nuxt preview"),
            ("postinstall", "nuxt prepare"),
        ],
    )?;

    if strategy != InstallationStrategy::Manual {
        return Ok(());
    }

    writer.patch_json("tsconfig.json", &[("extends", json!("./.nuxt/tsconfig.json"))])?;
    writer.write_if_absent("nuxt.config.ts", NUXT_CONFIG)?;
    writer.write_if_absent("app.vue", APP_VUE)?;
    writer.ensure_dir("public")?;
    Ok(())
}
