//! Vue (Vite)

use crate::error::Result;
use crate::install::{InstallCommandSet, InstallationStrategy, ProjectTarget, Script};
use crate::templates::ConfigWriter;
use serde_json::json;

const VITE_CONFIG: &str = r#"import { defineConfig } from 'vite';
import vue from '@vitejs/plugin-vue';

export default defineConfig({
  plugins: [vue()],
});
"#;

const MAIN_TS: &str = r#"import { createApp } from 'vue';
import App from './App.vue';

createApp(App).mount('#app');
"#;

const APP_VUE: &str = r#"<script setup lang="ts">
const message = 'Welcome to Vue';
</script>

<template>
  <h1>{{ message }}</h1>
</template>
"#;

const ENV_D_TS: &str = "/// <reference types=\"vite/client\" />\n";

fn index_html(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{}</title>
  </head>
  <body>
    <div id="app"></div>
    <script type="module" src="/src/main.ts"></script>
  </body>
</html>
"#,
        title
    )
}

pub(super) fn install_commands(version: &str) -> InstallCommandSet {
    InstallCommandSet::new()
        .with_local(Script::new([
            format!("npx --yes create-vue@{} . --ts", version),
            "npm install".to_string(),
        ]))
        .with_manual(Script::new([
            "npm install vue",
            "npm install --save-dev vite @vitejs/plugin-vue typescript vue-tsc",
        ]))
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
            ("dev", "vite"),
            ("build", "vue-tsc --noEmit && vite build"),
            ("preview", "vite preview"),
        ],
    )?;

    if strategy != InstallationStrategy::Manual {
        return Ok(());
    }

    writer.write_if_absent("vite.config.ts", VITE_CONFIG)?;
    writer.write_if_absent("index.html", &index_html(&target.name))?;
    writer.write_if_absent("src/main.ts", MAIN_TS)?;
    writer.write_if_absent("src/App.vue", APP_VUE)?;
    writer.write_if_absent("src/env.d.ts", ENV_D_TS)?;
    writer.patch_json(
        "tsconfig.json",
        &[
            ("compilerOptions.target", json!("ES2020")),
            ("compilerOptions.module", json!("ESNext")),
            ("compilerOptions.moduleResolution", json!("bundler")),
            ("compilerOptions.strict", json!(true)),
            ("compilerOptions.jsx", json!("preserve")),
            ("compilerOptions.noEmit", json!(true)),
            ("compilerOptions.skipLibCheck", json!(true)),
            ("include", json!(["src/**/*.ts", "src/**/*.vue"])),
        ],
    )?;
    writer.ensure_dir("public")?;
    Ok(())
}
