use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Swagger From Service - Generate Swagger 1.2 documents from REST service descriptors
#[derive(Parser, Debug)]
#[command(name = "swagger-from-service")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the API descriptor file (.json, .yaml or .yml)
    #[arg(value_name = "DESCRIPTOR")]
    pub descriptor_path: PathBuf,

    /// Service to document; emits the resource listing when omitted
    #[arg(short = 's', long = "service", value_name = "NAME")]
    pub service: Option<String>,

    /// Base URL the API is served from
    #[arg(short = 'b', long = "base-url", default_value = "")]
    pub base_url: String,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.descriptor_path.exists() {
        anyhow::bail!(
            "Descriptor file does not exist: {}",
            args.descriptor_path.display()
        );
    }

    if !args.descriptor_path.is_file() {
        anyhow::bail!(
            "Descriptor path is not a file: {}",
            args.descriptor_path.display()
        );
    }

    info!("Descriptor: {}", args.descriptor_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }
    match args.service {
        Some(ref service) => info!("Service: {}", service),
        None => info!("Service: none, emitting resource listing"),
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::declaration_builder::DeclarationBuilder;
    use crate::descriptor::ApiDescriptor;
    use crate::listing_builder::ResourceListingBuilder;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Loading API descriptor...");
    let api = ApiDescriptor::from_file(&args.descriptor_path).with_context(|| {
        format!(
            "Failed to load descriptor: {}",
            args.descriptor_path.display()
        )
    })?;
    info!("Loaded API {} with {} services", api.name, api.services.len());

    let content = match &args.service {
        Some(name) => {
            let service = api.service(name)?;
            info!("Building API declaration for {}...", service.name);
            let doc = DeclarationBuilder::new(args.base_url.clone())
                .build(service)
                .with_context(|| format!("Failed to document service {}", service.name))?;
            info!(
                "Documented {} operation groups and {} models",
                doc.apis.len(),
                doc.models.len()
            );

            match args.output_format {
                OutputFormat::Json => serialize_json(&doc)?,
                OutputFormat::Yaml => serialize_yaml(&doc)?,
            }
        }
        None => {
            info!("Building resource listing...");
            let listing = ResourceListingBuilder::build(&api);
            match args.output_format {
                OutputFormat::Json => serialize_json(&listing)?,
                OutputFormat::Yaml => serialize_yaml(&listing)?,
            }
        }
    };

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
    } else {
        println!("{}", content);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DESCRIPTOR: &str = r#"{
        "name": "Shop",
        "version": "1",
        "services": [
            {
                "name": "Order",
                "route": "/orders[/:order_id]",
                "routeIdentifierName": "order_id",
                "operations": [{"httpMethod": "GET", "description": "List orders"}],
                "entityOperations": [{"httpMethod": "PUT", "description": "Replace an order"}]
            }
        ]
    }"#;

    fn args_for(temp_dir: &TempDir, extra: &[&str]) -> CliArgs {
        let descriptor = temp_dir.path().join("shop.json");
        fs::write(&descriptor, DESCRIPTOR).unwrap();

        let mut argv = vec!["swagger-from-service".to_string(), descriptor.display().to_string()];
        argv.extend(extra.iter().map(|arg| arg.to_string()));
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let args = args_for(&temp_dir, &[]);

        assert!(args.service.is_none());
        assert_eq!(args.base_url, "");
        assert!(matches!(args.output_format, OutputFormat::Json));
        assert!(!args.verbose);
    }

    #[test]
    fn test_missing_descriptor_rejected() {
        let args = CliArgs::parse_from(["swagger-from-service", "/nonexistent/shop.json"]);
        assert!(parse_args_from_parsed(args).is_err());
    }

    #[test]
    fn test_directory_descriptor_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().display().to_string();
        let args = CliArgs::parse_from(["swagger-from-service", path.as_str()]);
        assert!(parse_args_from_parsed(args).is_err());
    }

    #[test]
    fn test_run_writes_declaration() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("out").join("order.json");
        let output_arg = output.display().to_string();
        let args = args_for(
            &temp_dir,
            &["--service", "Order", "--base-url", "http://localhost", "-o", output_arg.as_str()],
        );

        run(parse_args_from_parsed(args).unwrap()).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(doc["basePath"], "http://localhost");
        assert_eq!(doc["apis"][0]["path"], "/orders");
        assert_eq!(doc["apis"][1]["path"], "/orders/{order_id}");
    }

    #[test]
    fn test_run_writes_listing_as_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("listing.yaml");
        let output_arg = output.display().to_string();
        let args = args_for(&temp_dir, &["-f", "yaml", "-o", output_arg.as_str()]);

        run(args).unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("path: /Order"));
        assert!(content.contains("Operations about Order"));
    }

    #[test]
    fn test_run_unknown_service() {
        let temp_dir = TempDir::new().unwrap();
        let args = args_for(&temp_dir, &["--service", "Invoice"]);

        assert!(run(args).is_err());
    }
}
