//! Next.js

use crate::error::Result;
use crate::install::{InstallCommandSet, InstallationStrategy, ProjectTarget, Script};
use crate::templates::ConfigWriter;
use serde_json::json;

const NEXT_CONFIG: &str = r#"/** @type {import('next').NextConfig} */
const nextConfig = {
  reactStrictMode: true,
};

export default nextConfig;
"#;

const LAYOUT: &str = r#"export const metadata = {
  title: "Create Next App",
};

export default function RootLayout({ children }: { children: React.ReactNode }) {
  return (
    <html lang="en">
      <body>{children}</body>
    </html>
  );
}
"#;

const PAGE: &str = r#"export default function Home() {
  return (
    <main>
      <h1>Welcome to Next.js</h1>
      <p>Edit src/app/page.tsx to get started.</p>
    </main>
  );
}
"#;

pub(super) fn install_commands(version: &str) -> InstallCommandSet {
    InstallCommandSet::new()
        .with_local(Script::new([format!(
            "npx --yes create-next-app@{} . --ts --app --src-dir --use-npm --no-eslint --no-tailwind --import-alias \"@/*\"",
            version
        )]))
        .with_manual(Script::new([
            format!("npm install next@{} react react-dom", version),
            "npm install --save-dev typescript @types/react @types/react-dom @types/node"
                .to_string(),
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
            ("dev", "next dev"),
            ("build", "next build"),
            ("start", "next start"),
        ],
    )?;

    if strategy != InstallationStrategy::Manual {
        return Ok(());
    }

    writer.patch_json(
        "tsconfig.json",
        &[
            ("compilerOptions.target", json!("ES2017")),
            ("compilerOptions.lib", json!(["dom", "dom.iterable", "esnext"])),
            ("compilerOptions.allowJs", json!(true)),
            ("compilerOptions.skipLibCheck", json!(true)),
            ("compilerOptions.strict", json!(true)),
            ("compilerOptions.noEmit", json!(true)),
            ("compilerOptions.esModuleInterop", json!(true)),
            ("compilerOptions.module", json!("esnext")),
            ("compilerOptions.moduleResolution", json!("bundler")),
            ("compilerOptions.resolveJsonModule", json!(true)),
            ("compilerOptions.isolatedModules", json!(true)),
            ("compilerOptions.jsx", json!("preserve")),
            ("compilerOptions.incremental", json!(true)),
            ("compilerOptions.plugins", json!([{ "name": "next" }])),
            ("compilerOptions.paths", json!({ "@/*": ["./src/*"] })),
            ("include", json!(["next-env.d.ts", "**/*.ts", "**/*.tsx", ".next/types/**/*.ts"])),
            ("exclude", json!(["node_modules"])),
        ],
    )?;
    writer.write_if_absent("next.config.mjs", NEXT_CONFIG)?;
    writer.write_if_absent("src/app/layout.tsx", LAYOUT)?;
    writer.write_if_absent("src/app/page.tsx", PAGE)?;
    writer.ensure_dir("public")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::ArtifactAction;
    use std::fs;

    #[test]
    fn test_manual_setup_writes_app_router_skeleton() {
        let tmp = tempfile::tempdir().unwrap();
        let target = ProjectTarget::resolve(tmp.path(), ".");
        let mut writer = ConfigWriter::new(&target.path);

        setup_config(&mut writer, &target, InstallationStrategy::Manual).unwrap();

        for file in ["package.json", "tsconfig.json", "next.config.mjs", "src/app/page.tsx"] {
            assert!(target.path.join(file).exists(), "{} missing", file);
        }
        assert!(target.path.join("public").is_dir());
    }

    #[test]
    fn test_existing_next_config_is_not_regenerated() {
        let tmp = tempfile::tempdir().unwrap();
        let target = ProjectTarget::resolve(tmp.path(), ".");
        fs::write(target.path.join("next.config.mjs"), "export default { output: 'export' };\n")
            .unwrap();
        let mut writer = ConfigWriter::new(&target.path);

        setup_config(&mut writer, &target, InstallationStrategy::Manual).unwrap();

        assert!(fs::read_to_string(target.path.join("next.config.mjs"))
            .unwrap()
            .contains("output: 'export'"));
        assert!(matches!(
            writer.report().action("next.config.mjs"),
            Some(ArtifactAction::Skipped(_))
        ));
    }

    #[test]
    fn test_local_setup_only_patches_scripts() {
        let tmp = tempfile::tempdir().unwrap();
        let target = ProjectTarget::resolve(tmp.path(), ".");
        fs::write(
            target.path.join("package.json"),
            r#"{"name":"my-app","scripts":{"build":"custom-build"}}"#,
        )
        .unwrap();
        let mut writer = ConfigWriter::new(&target.path);

        setup_config(&mut writer, &target, InstallationStrategy::Local).unwrap();

        let pkg: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(target.path.join("package.json")).unwrap())
                .unwrap();
        assert_eq!(pkg["scripts"]["build"], "custom-build");
        assert_eq!(pkg["scripts"]["dev"], "next dev");
        assert!(!target.path.join("next.config.mjs").exists());
    }
}
