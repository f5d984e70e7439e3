// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // CLI readability over pedantic

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use lai_meta::adapter::check_create_attributes;
use lai_meta::config::{MetaConfig, Profile, StatPrecisionPolicy};
use lai_meta::metadata::{AttrMetadata, Registry};
use lai_meta::serialize::{
    deserialize_attribute, deserialize_attribute_value, serialize_attribute,
    serialize_attribute_value, to_text,
};
use lai_meta::types::{Attribute, ObjectType};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "laictl")]
#[command(about = "Inspect LAI line-card metadata and its text format")]
#[command(version)]
struct Cli {
    /// Catalog file (YAML or JSON); the bundled sample when omitted
    #[arg(short, long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    /// KEY=VALUE or YAML profile supplying LAI_META_* settings
    #[arg(short, long, value_name = "FILE", global = true)]
    profile: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List object types with their attributes and statistics
    Dump {
        /// Only this object type (`PORT`, `LAI_OBJECT_TYPE_OA`)
        #[arg(long, value_name = "TYPE")]
        object_type: Option<String>,
    },

    /// Show the metadata behind an attribute or statistic name
    Lookup {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Encode a value text as an attribute object
    Encode {
        /// Attribute name
        #[arg(value_name = "ATTR")]
        attr: String,

        /// Value in the serializer's text format
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Decode an attribute object
    Decode {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Validate a create request given as ATTR=VALUE pairs
    CheckCreate {
        #[arg(long, value_name = "TYPE")]
        object_type: String,

        #[arg(value_name = "ATTR=VALUE")]
        attrs: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.profile {
        Some(path) => {
            let profile = Profile::load(0, path)?;
            MetaConfig::from_profile(&profile, 0)?
        }
        None => MetaConfig::default(),
    };
    if cli.catalog.is_some() {
        config.catalog_path.clone_from(&cli.catalog);
    }
    if cli.verbose {
        config.log_level = log::LevelFilter::Debug;
    }

    lai_meta::logging::init_from_config(&config)?;

    let registry = open_registry(&config)?;

    match cli.command {
        Commands::Dump { object_type } => {
            cmd_dump(&registry, object_type.as_deref(), config.stat_precision)?;
        }
        Commands::Lookup { name } => cmd_lookup(&registry, &name)?,
        Commands::Encode { attr, value } => cmd_encode(&registry, &attr, &value)?,
        Commands::Decode { text } => cmd_decode(&registry, &text)?,
        Commands::CheckCreate { object_type, attrs } => {
            cmd_check_create(&registry, &object_type, &attrs)?;
        }
    }

    Ok(())
}

fn open_registry(config: &MetaConfig) -> anyhow::Result<Registry> {
    let source = config
        .catalog_path
        .as_deref()
        .map_or_else(|| String::from("bundled catalog"), |p| p.display().to_string());
    config
        .load_registry()
        .with_context(|| format!("loading {}", source))
}

fn attr_by_name<'r>(registry: &'r Registry, name: &str) -> anyhow::Result<&'r AttrMetadata> {
    registry
        .attr_metadata_by_name(name)
        .ok_or_else(|| anyhow!("unknown attribute {}", name))
}

/// Parse `text` as a complete value of `meta`'s type.
fn parse_value(meta: &AttrMetadata, text: &str) -> anyhow::Result<Attribute> {
    let (value, consumed) = deserialize_attribute_value(text.as_bytes(), meta)
        .with_context(|| format!("{} as {}", text, meta.value_type))?;
    if consumed != text.len() {
        bail!("trailing input after value of {}: {}", meta.name, &text[consumed..]);
    }
    Ok(Attribute::new(meta.attr_id, value))
}

fn cmd_dump(
    registry: &Registry,
    only: Option<&str>,
    precision: StatPrecisionPolicy,
) -> anyhow::Result<()> {
    let only = only
        .map(str::parse::<ObjectType>)
        .transpose()?;

    for ot in registry.object_types() {
        if only.is_some_and(|o| o != ot) {
            continue;
        }
        let by_ref = if registry.is_object_type_backed_by_reference(ot) {
            "object id"
        } else {
            "key"
        };
        println!("{} ({})", ot, by_ref);

        for meta in registry.attr_metadata_list(ot) {
            let default = match meta.const_default() {
                Some(v) => to_text(|w| serialize_attribute_value(w, meta, v))?,
                None => String::from("-"),
            };
            println!(
                "  {:>3} {:45} {:16} [{}] default={}",
                meta.attr_id, meta.name, meta.value_type.as_str(), meta.flags, default
            );
        }
        for stat in registry.stat_metadata_list(ot) {
            let digits = match precision {
                StatPrecisionPolicy::Declared => stat.precision.digits(),
                StatPrecisionPolicy::Fixed2 => 2,
            };
            println!(
                "  {:>3} {:45} {:16} unit={} digits={}",
                stat.stat_id, stat.name, stat.value_type.as_str(), stat.unit, digits
            );
        }
        println!();
    }
    Ok(())
}

fn cmd_lookup(registry: &Registry, name: &str) -> anyhow::Result<()> {
    if let Some(meta) = registry.attr_metadata_by_name(name) {
        println!("name:        {}", meta.name);
        println!("object type: {}", meta.object_type);
        println!("id:          {}", meta.attr_id);
        println!("type:        {}", meta.value_type);
        println!("flags:       {}", meta.flags);
        if let Some(e) = &meta.enum_metadata {
            let names: Vec<&str> = e.values.iter().map(|v| v.name.as_str()).collect();
            println!("enum:        {} {{{}}}", e.name, names.join(", "));
        }
        if meta.is_conditional() {
            println!("condition:   {:?} {:?}", meta.condition_type, meta.conditions);
        }
        if meta.is_valid_only() {
            println!("valid only:  {:?} {:?}", meta.valid_only_type, meta.valid_only);
        }
        return Ok(());
    }
    if let Some(stat) = registry.stat_metadata_by_name(name) {
        println!("name:        {}", stat.name);
        println!("object type: {}", stat.object_type);
        println!("id:          {}", stat.stat_id);
        println!("type:        {}", stat.value_type);
        println!("unit:        {}", stat.unit);
        println!("precision:   {}", stat.precision);
        return Ok(());
    }
    bail!("no attribute or statistic named {}", name)
}

fn cmd_encode(registry: &Registry, attr: &str, value: &str) -> anyhow::Result<()> {
    let meta = attr_by_name(registry, attr)?;
    let attr = parse_value(meta, value)?;
    println!("{}", to_text(|w| serialize_attribute(w, meta, &attr))?);
    Ok(())
}

fn cmd_decode(registry: &Registry, text: &str) -> anyhow::Result<()> {
    let (meta, attr, consumed) = deserialize_attribute(registry, text.as_bytes())?;
    println!("{} ({}, id {})", meta.name, meta.object_type, meta.attr_id);
    println!("value: {:?}", attr.value);
    if consumed != text.len() {
        println!("[WARN] {} trailing bytes ignored", text.len() - consumed);
    }
    Ok(())
}

fn cmd_check_create(registry: &Registry, object_type: &str, pairs: &[String]) -> anyhow::Result<()> {
    let object_type: ObjectType = object_type.parse()?;
    let mut attrs = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected ATTR=VALUE, got {}", pair))?;
        let meta = attr_by_name(registry, name)?;
        attrs.push(parse_value(meta, value)?);
    }

    match check_create_attributes(registry, object_type, &attrs) {
        Ok(()) => {
            println!("[OK] create {} accepted", object_type);
            Ok(())
        }
        Err(status) => bail!("[FAIL] create {} rejected: {} ({})", object_type, status, status.code()),
    }
}
