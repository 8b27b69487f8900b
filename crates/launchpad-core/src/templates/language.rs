//! Plain TypeScript / JavaScript project setup

use super::writer::ConfigWriter;
use crate::error::Result;
use crate::install::{InstallCommandSet, ProjectTarget, Script};
use crate::runtime::Runtime;
use serde_json::json;
use std::fmt;

const GITIGNORE: &str = "node_modules/\ndist/\n.env\n";

const INDEX_TS: &str = r#"const greet = (name: string): string => `Hello, ${name}!`;

console.log(greet("world"));
"#;

const INDEX_JS: &str = r#"const greet = (name) => `Hello, ${name}!`;

console.log(greet("world"));
"#;

/// Plain language setups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    JavaScript,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::TypeScript, Language::JavaScript];

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
        }
    }

    /// Short identifier accepted on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Language::TypeScript => "ts",
            Language::JavaScript => "js",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" => Some(Language::TypeScript),
            "javascript" | "js" => Some(Language::JavaScript),
            _ => None,
        }
    }

    pub fn prerequisites(&self) -> &'static [Runtime] {
        &[Runtime::Node, Runtime::Npm]
    }

    /// The same dev-dependency install works for a new or an existing directory
    pub fn install_commands(&self) -> InstallCommandSet {
        let script = match self {
            Language::TypeScript => Script::new(["npm install --save-dev typescript tsx @types/node"]),
            Language::JavaScript => Script::new(["npm install --save-dev nodemon"]),
        };
        InstallCommandSet::new()
            .with_local(script.clone())
            .with_manual(script)
    }

    pub fn setup_config(&self, writer: &mut ConfigWriter, target: &ProjectTarget) -> Result<()> {
        let fields = [
            ("name", json!(target.package_name())),
            ("version", json!("0.1.0")),
            ("private", json!(true)),
            ("type", json!("module")),
        ];

        match self {
            Language::TypeScript => {
                writer.patch_package_json(
                    &fields,
                    &[
                        ("build", "tsc"),
                        ("start", "node dist/index.js"),
                        ("dev", "tsx watch src/index.ts"),
                    ],
                )?;
                writer.patch_json(
                    "tsconfig.json",
                    &[
                        ("compilerOptions.target", json!("ES2022")),
                        ("compilerOptions.module", json!("NodeNext")),
                        ("compilerOptions.moduleResolution", json!("NodeNext")),
                        ("compilerOptions.rootDir", json!("src")),
                        ("compilerOptions.outDir", json!("dist")),
                        ("compilerOptions.strict", json!(true)),
                        ("compilerOptions.esModuleInterop", json!(true)),
                        ("compilerOptions.skipLibCheck", json!(true)),
                        ("include", json!(["src"])),
                    ],
                )?;
                writer.write_if_absent("src/index.ts", INDEX_TS)?;
            }
            Language::JavaScript => {
                writer.patch_package_json(
                    &fields,
                    &[
                        ("start", "node src/index.js"),
                        ("dev", "nodemon src/index.js"),
                    ],
                )?;
                writer.write_if_absent("src/index.js", INDEX_JS)?;
            }
        }

        writer.write_if_absent(".gitignore", GITIGNORE)?;
        Ok(())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
