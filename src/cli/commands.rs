//! CLI command handlers.

use std::fs;

use crate::config::ProviderConfig;
use crate::config_generator::{ConfigGenerator, ConfigGeneratorOptions};
use crate::craft::{run_craft, CraftOptions};
use crate::error::{Result, VoicecraftError};
use crate::naming::{FilenameGenerator, FilenameOptions, NamingProvider};
use crate::provider::{create_completion_client, ProviderKind};
use crate::voices::VoiceRegistry;

use super::{CraftArgs, GenArgs, NameArgs, VoicesArgs};

/// Handle `voicecraft craft`.
pub async fn handle_craft(args: CraftArgs) -> Result<()> {
    let options = CraftOptions {
        config_path: args.config,
        override_text: args.override_text,
        override_output: args.override_output,
    };
    let path = run_craft(&options, &ProviderConfig::from_env()).await?;
    println!("Audio saved to: {}", path.display());
    Ok(())
}

/// Handle `voicecraft gen`.
pub async fn handle_gen(args: GenArgs) -> Result<()> {
    let generator = ConfigGenerator::new(ConfigGeneratorOptions {
        model: args.model,
        temperature: args.temperature,
        max_tokens: args.max_tokens,
        few_shot_path: args.few_shot,
    })?;
    let client = create_completion_client(&generator.options().model, &ProviderConfig::from_env())?;

    let path = generator
        .generate_to_file(client.as_ref(), &args.instructions, &args.output)
        .await?;
    println!("Generated config written to: {}", path.display());
    Ok(())
}

/// Handle `voicecraft name`.
pub async fn handle_name(args: NameArgs) -> Result<()> {
    let content = match (args.text, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            if !path.is_file() {
                return Err(VoicecraftError::NotFound(path));
            }
            fs::read_to_string(&path)?.trim().to_string()
        }
        (None, None) => String::new(),
    };
    if content.is_empty() {
        return Err(VoicecraftError::MissingTextContent);
    }

    let mut config = ProviderConfig::from_env();
    if let Some(key) = args.api_key {
        let kind = match args.provider {
            NamingProvider::OpenAi => ProviderKind::OpenAi,
            NamingProvider::Gemini => ProviderKind::Gemini,
        };
        config.set_api_key(kind, key);
    }

    let mut options = FilenameOptions::default()
        .with_extension(args.extension)
        .with_max_length(args.max_length);
    if args.no_timestamp {
        options = options.without_timestamp();
    }

    let name = FilenameGenerator::new(args.provider, &config)
        .generate(&content, &options)
        .await;
    println!("{name}");
    Ok(())
}

/// Handle `voicecraft voices`.
pub fn handle_voices(args: VoicesArgs) -> Result<()> {
    let registry = VoiceRegistry::global();

    if let Some(context) = args.suggest {
        let suggested = registry.suggestions(&context);
        if suggested.is_empty() {
            println!("No suggestions for that context.");
        }
        for name in suggested {
            println!("{name}");
        }
        return Ok(());
    }

    let needle = args.characteristic.map(|c| c.to_lowercase());
    for entry in registry.all() {
        if args.category.is_some_and(|c| c != entry.category) {
            continue;
        }
        if let Some(needle) = &needle {
            if !entry.characteristic.to_lowercase().contains(needle) {
                continue;
            }
        }
        println!("{:<16}{:<24}{}", entry.name, entry.characteristic, entry.category);
    }
    Ok(())
}
