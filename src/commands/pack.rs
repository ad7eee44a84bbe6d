use std::env;

use anyhow::Context;
use binpacker::{BinPacker, InputItem, MultiBinPacker, PackError};

use crate::{
    data::{Config, Layout, LayoutRect, LAYOUT_FILENAME},
    options::PackOptions,
};

pub fn pack(options: PackOptions) -> anyhow::Result<()> {
    let project_path = match options.project_path {
        Some(path) => path,
        None => env::current_dir()?,
    };

    let mut config = match Config::read_from_folder_or_file(&project_path) {
        Ok(config) => config,
        Err(err) if err.is_not_found() => anyhow::bail!(
            "No binpack.toml found at {}. Pass the path to a project file or a folder \
             containing one.",
            project_path.display()
        ),
        Err(err) => return Err(err.into()),
    };

    if let Some(bin_size) = options.bin_size {
        config.bin_size = bin_size.into();
    }
    config.grow |= options.grow;
    config.multi_bin |= options.multi_bin;

    let layout = pack_config(&config)
        .with_context(|| format!("Could not pack project \"{}\"", config.name))?;

    let output = match options.output {
        Some(path) => path,
        None => config.folder().join(LAYOUT_FILENAME),
    };
    layout.write_to_file(&output)?;

    log::info!(
        "Packed {} rects into {} bin(s) of size {}x{}, wrote {}",
        layout.rects.len(),
        layout.bin_count,
        layout.bin_size.0,
        layout.bin_size.1,
        output.display()
    );

    Ok(())
}

/// Packs every rect in the project, growing the bin between attempts if the
/// project asks for it.
pub(crate) fn pack_config(config: &Config) -> Result<Layout, PackError> {
    let inputs: Vec<_> = config
        .rects
        .iter()
        .map(|rect| InputItem::new(rect.size))
        .collect();

    let mut bin_size = config.bin_size;

    loop {
        let result = if config.multi_bin {
            pack_many(config, &inputs, bin_size)
        } else {
            pack_one(config, &inputs, bin_size)
        };

        match result {
            Ok(layout) => return Ok(layout),

            Err(err) if config.grow && can_grow(bin_size, config.max_bin_size) => {
                let next_size = grow(bin_size, config.max_bin_size);

                log::info!(
                    "{}; retrying with a {}x{} bin",
                    err,
                    next_size.0,
                    next_size.1
                );

                bin_size = next_size;
            }

            Err(err) => return Err(err),
        }
    }
}

fn pack_one(
    config: &Config,
    inputs: &[InputItem],
    bin_size: (u32, u32),
) -> Result<Layout, PackError> {
    let mut packer = BinPacker::new(bin_size).allow_rotation(config.allow_rotation);
    let placements = packer.pack(inputs)?;

    let rects = config
        .rects
        .iter()
        .zip(placements)
        .map(|(rect, placement)| LayoutRect {
            name: rect.name.clone(),
            bin: 0,
            min: placement.min(),
            max: placement.max(),
        })
        .collect();

    Ok(Layout {
        name: config.name.clone(),
        bin_size,
        bin_count: 1,
        allow_rotation: packer.rotation_allowed(),
        rects,
    })
}

fn pack_many(
    config: &Config,
    inputs: &[InputItem],
    bin_size: (u32, u32),
) -> Result<Layout, PackError> {
    let mut packer = MultiBinPacker::new(bin_size).allow_rotation(config.allow_rotation);
    let placements = packer.pack(inputs)?;

    let rects = config
        .rects
        .iter()
        .zip(placements)
        .map(|(rect, placed)| LayoutRect {
            name: rect.name.clone(),
            bin: placed.bin(),
            min: placed.placement().min(),
            max: placed.placement().max(),
        })
        .collect();

    Ok(Layout {
        name: config.name.clone(),
        bin_size,
        bin_count: packer.bin_count(),
        allow_rotation: packer.rotation_allowed(),
        rects,
    })
}

fn can_grow(size: (u32, u32), max_size: (u32, u32)) -> bool {
    size.0 < max_size.0 || size.1 < max_size.1
}

/// Doubles both dimensions, clamping each to the maximum. A dimension that
/// already exceeds the maximum is left alone.
fn grow(size: (u32, u32), max_size: (u32, u32)) -> (u32, u32) {
    let grow_one = |current: u32, max: u32| current.saturating_mul(2).min(max).max(current);

    (grow_one(size.0, max_size.0), grow_one(size.1, max_size.1))
}
