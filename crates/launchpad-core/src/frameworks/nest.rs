//! NestJS

use super::major;
use crate::error::Result;
use crate::install::{shell_arg, InstallCommandSet, InstallationStrategy, ProjectTarget, Script};
use crate::templates::ConfigWriter;
use serde_json::json;

const NEST_CLI: &str = r#"{
  "$schema": "https://json.schemastore.org/nest-cli",
  "collection": "@nestjs/schematics",
  "sourceRoot": "src",
  "compilerOptions": {
    "deleteOutDir": true
  }
}
"#;

const MAIN_TS: &str = r#"import { NestFactory } from '@nestjs/core';
import { AppModule } from './app.module';

async function bootstrap() {
  const app = await NestFactory.create(AppModule);
  await app.listen(process.env.PORT ?? 3000);
}
bootstrap();
"#;

const APP_MODULE: &str = r#"import { Module } from '@nestjs/common';
import { AppController } from './app.controller';

@Module({
  controllers: [AppController],
})
export class AppModule {}
"#;

const APP_CONTROLLER: &str = r#"import { Controller, Get } from '@nestjs/common';

@Controller()
export class AppController {
  @Get()
  getHello(): string {
    return 'Hello World!';
  }
}
"#;

pub(super) fn install_commands(version: &str, target: &ProjectTarget) -> InstallCommandSet {
    let name = target.package_name();
    let m = major(version);

    InstallCommandSet::new()
        .with_global(Script::new([
            format!("npm install -g @nestjs/cli@{}", version),
            format!(
                "nest new {} --directory {} --package-manager npm --skip-git",
                name,
                shell_arg(&target.path.to_string_lossy())
            ),
        ]))
        .with_local(Script::new([format!(
            "npx --yes @nestjs/cli@{} new {} --directory . --package-manager npm --skip-git",
            version, name
        )]))
        .with_manual(Script::new([
            format!(
                "npm install @nestjs/core@{m} @nestjs/common@{m} @nestjs/platform-express@{m} reflect-metadata rxjs"
            ),
            format!(
                "npm install --save-dev @nestjs/cli@{} @nestjs/schematics typescript @types/node",
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
            ("build", "nest build"),
            ("start", "nest start"),
            ("start:dev", "nest start --watch"),
            ("start:prod", "node dist/main"),
        ],
    )?;

    if strategy != InstallationStrategy::Manual {
        return Ok(());
    }

    writer.write_if_absent("nest-cli.json", NEST_CLI)?;
    writer.patch_json(
        "tsconfig.json",
        &[
            ("compilerOptions.module", json!("commonjs")),
            ("compilerOptions.declaration", json!(true)),
            ("compilerOptions.emitDecoratorMetadata", json!(true)),
            ("compilerOptions.experimentalDecorators", json!(true)),
            ("compilerOptions.target", json!("ES2021")),
            ("compilerOptions.sourceMap", json!(true)),
            ("compilerOptions.outDir", json!("./dist")),
            ("compilerOptions.baseUrl", json!("./")),
            ("compilerOptions.skipLibCheck", json!(true)),
        ],
    )?;
    writer.write_if_absent("src/main.ts", MAIN_TS)?;
    writer.write_if_absent("src/app.module.ts", APP_MODULE)?;
    writer.write_if_absent("src/app.controller.ts", APP_CONTROLLER)?;
    Ok(())
}
