use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::settings::{ColliderMode, ImportSettings};

#[derive(Parser, Debug)]
#[command(name = "brushwork")]
#[command(version = concat!(env!("VERGEN_GIT_BRANCH"), "/",env!("VERGEN_GIT_SHA")))]
#[command(about = "Turns brush based levels into meshes and colliders and decodes WAD texture archives")]
pub struct CliArgs {
    /// JSON file with import settings, missing values use the defaults
    #[arg(long, env = "BRUSHWORK_SETTINGS")]
    pub settings: Option<PathBuf>,

    #[arg(long, env = "BRUSHWORK_SCALE")]
    pub scale: Option<f32>,

    #[arg(long)]
    pub prefix: Option<String>,

    #[arg(long, value_enum)]
    pub collider_mode: Option<ColliderMode>,

    #[command(subcommand)]
    pub operation_mode: OperationMode,
}

#[derive(Subcommand, Debug)]
pub enum OperationMode {
    /// Build the meshes and colliders of a level dump
    Mesh {
        level: PathBuf,
        /// Texture archives to take the texture dimensions from
        #[arg(long = "wad")]
        wads: Vec<PathBuf>,
    },
    /// Decode every image of a texture archive
    Wad { archive: PathBuf },
}

impl CliArgs {
    /// The settings file (if any) with the command line overrides applied on top.
    pub fn import_settings(&self) -> Result<ImportSettings, anyhow::Error> {
        let mut settings = match &self.settings {
            Some(path) => ImportSettings::from_json_file(path)?,
            None => ImportSettings::default(),
        };

        if let Some(scale) = self.scale {
            settings.scale = scale;
        }

        if let Some(prefix) = &self.prefix {
            settings.entity_name_prefix = prefix.clone();
        }

        if let Some(collider_mode) = self.collider_mode {
            settings.collider_mode = collider_mode;
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use crate::settings::ColliderMode;
    use crate::settings::cli::{CliArgs, OperationMode};
    use clap::Parser;

    #[test]
    pub fn overrides_apply_on_top_of_defaults() {
        let args = CliArgs::parse_from([
            "brushwork",
            "--scale",
            "0.5",
            "--collider-mode",
            "concave-all",
            "mesh",
            "level.json",
            "--wad",
            "a.wad",
            "--wad",
            "b.wad",
        ]);

        let settings = args.import_settings().expect("no settings file involved");
        assert_eq!(settings.scale, 0.5);
        assert_eq!(settings.collider_mode, ColliderMode::ConcaveAll);
        assert_eq!(settings.entity_name_prefix, "entity");

        match args.operation_mode {
            OperationMode::Mesh { level, wads } => {
                assert_eq!(level.to_str(), Some("level.json"));
                assert_eq!(wads.len(), 2);
            }
            OperationMode::Wad { .. } => panic!("Parsed the wrong subcommand"),
        }
    }
}
