use crate::cli::args::GenerateArgs;
use crate::exit_codes::SUCCESS;
use anyhow::Context;
use replay_core::load_baseline;
use replay_core::template::{self, GenerateConfig};

pub fn cmd_generate(args: GenerateArgs) -> anyhow::Result<i32> {
    let baseline = load_baseline(&args.capture)?;

    if args.stdout {
        print!("{}", template::render_main_rs(&baseline));
        return Ok(SUCCESS);
    }

    let mut config = GenerateConfig::default()
        .with_name(args.name.clone())
        .with_force(args.force);
    if let Some(path) = &args.core_path {
        // The manifest is read from out_dir, so pin the path down first.
        let path = std::fs::canonicalize(path)
            .with_context(|| format!("core path {} not found", path.display()))?;
        config = config.with_core_path(path);
    }

    let out_dir = args.out_dir();
    let project = template::write_project(&baseline, &config, &out_dir)?;

    println!("✓ Created {}", project.manifest_path.display());
    println!("✓ Created {}", project.main_path.display());
    println!(
        "\nNext: cargo run --manifest-path {} -- --help",
        project.manifest_path.display()
    );

    Ok(SUCCESS)
}
