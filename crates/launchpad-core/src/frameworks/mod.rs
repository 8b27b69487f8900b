//! Supported web frameworks
//!
//! Every framework is a variant of [`Framework`]. Its static facts live in
//! [`Framework::descriptor`] and its behavior is dispatched from
//! [`Framework::install_commands`] and [`Framework::setup_config`]; adding a
//! framework means adding a variant and one arm to each of those matches.

mod angular;
mod nest;
mod next;
mod nuxt;
mod vue;

use crate::error::Result;
use crate::install::{InstallCommandSet, InstallationStrategy, ProjectTarget};
use crate::runtime::Runtime;
use crate::templates::ConfigWriter;
use clap::ValueEnum;
use semver::Version;
use std::fmt;

/// Runtimes every framework generator needs
const NODE_TOOLCHAIN: &[Runtime] = &[Runtime::Node, Runtime::Npm, Runtime::Npx];

/// Static facts about a framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkDescriptor {
    pub display_name: &'static str,
    /// Registry package whose versions are offered (the generator/CLI package)
    pub package: &'static str,
    pub repository: &'static str,
    pub prerequisites: &'static [Runtime],
}

static NEXT: FrameworkDescriptor = FrameworkDescriptor {
    display_name: "Next.js",
    package: "create-next-app",
    repository: "https://github.com/vercel/next.js",
    prerequisites: NODE_TOOLCHAIN,
};

static NUXT: FrameworkDescriptor = FrameworkDescriptor {
    display_name: "Nuxt",
    package: "nuxi",
    repository: "https://github.com/nuxt/nuxt",
    prerequisites: NODE_TOOLCHAIN,
};

static ANGULAR: FrameworkDescriptor = FrameworkDescriptor {
    display_name: "Angular",
    package: "@angular/cli",
    repository: "https://github.com/angular/angular-cli",
    prerequisites: NODE_TOOLCHAIN,
};

static VUE: FrameworkDescriptor = FrameworkDescriptor {
    display_name: "Vue",
    package: "create-vue",
    repository: "https://github.com/vuejs/create-vue",
    prerequisites: NODE_TOOLCHAIN,
};

static NEST: FrameworkDescriptor = FrameworkDescriptor {
    display_name: "NestJS",
    package: "@nestjs/cli",
    repository: "https://github.com/nestjs/nest-cli",
    prerequisites: NODE_TOOLCHAIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Framework {
    #[value(name = "next", alias = "nextjs")]
    NextJs,
    Nuxt,
    Angular,
    Vue,
    #[value(name = "nest", alias = "nestjs")]
    NestJs,
}

impl Framework {
    pub const ALL: [Framework; 5] = [
        Framework::NextJs,
        Framework::Nuxt,
        Framework::Angular,
        Framework::Vue,
        Framework::NestJs,
    ];

    pub fn descriptor(&self) -> &'static FrameworkDescriptor {
        match self {
            Framework::NextJs => &NEXT,
            Framework::Nuxt => &NUXT,
            Framework::Angular => &ANGULAR,
            Framework::Vue => &VUE,
            Framework::NestJs => &NEST,
        }
    }

    /// Short identifier accepted on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Framework::NextJs => "next",
            Framework::Nuxt => "nuxt",
            Framework::Angular => "angular",
            Framework::Vue => "vue",
            Framework::NestJs => "nest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Framework::from_str(s, true).ok()
    }

    pub fn install_commands(&self, version: &str, target: &ProjectTarget) -> InstallCommandSet {
        match self {
            Framework::NextJs => next::install_commands(version),
            Framework::Nuxt => nuxt::install_commands(version),
            Framework::Angular => angular::install_commands(version, target),
            Framework::Vue => vue::install_commands(version),
            Framework::NestJs => nest::install_commands(version, target),
        }
    }

    pub fn setup_config(
        &self,
        writer: &mut ConfigWriter,
        target: &ProjectTarget,
        strategy: InstallationStrategy,
    ) -> Result<()> {
        match self {
            Framework::NextJs => next::setup_config(writer, target, strategy),
            Framework::Nuxt => nuxt::setup_config(writer, target, strategy),
            Framework::Angular => angular::setup_config(writer, target, strategy),
            Framework::Vue => vue::setup_config(writer, target, strategy),
            Framework::NestJs => nest::setup_config(writer, target, strategy),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor().display_name)
    }
}

/// Major component of a version, for pinning sibling packages
fn major(version: &str) -> String {
    Version::parse(version)
        .map(|v| v.major.to_string())
        .unwrap_or_else(|_| version.to_string())
}
