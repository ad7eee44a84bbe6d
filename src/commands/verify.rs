use std::{collections::BTreeMap, fmt};

use binpacker::Rect;

use crate::{
    data::{Layout, LayoutRect},
    options::VerifyOptions,
};

pub fn verify(options: VerifyOptions) -> anyhow::Result<()> {
    let layout = Layout::read_from_file(&options.layout)?;
    let problems = find_problems(&layout);

    if !problems.is_empty() {
        let mut message = format!(
            "{} problem(s) in {}:",
            problems.len(),
            options.layout.display()
        );
        for problem in &problems {
            message.push_str(&format!("\n  {}", problem));
        }

        anyhow::bail!(message);
    }

    println!(
        "{}: {} rects in {} bin(s), no overlaps",
        options.layout.display(),
        layout.rects.len(),
        layout.bin_count
    );

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Problem {
    Malformed { name: String },
    NoSuchBin { name: String, bin: usize },
    OutOfBounds { name: String },
    Overlap { first: String, second: String },
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Malformed { name } => write!(f, "{}: max corner is below min corner", name),
            Problem::NoSuchBin { name, bin } => write!(f, "{}: bin {} does not exist", name, bin),
            Problem::OutOfBounds { name } => write!(f, "{}: extends past the edge of its bin", name),
            Problem::Overlap { first, second } => write!(f, "{} overlaps {}", first, second),
        }
    }
}

/// Checks every rectangle against its bin and against the other rectangles
/// in the same bin.
pub(crate) fn find_problems(layout: &Layout) -> Vec<Problem> {
    let bin = Rect::new((0, 0), layout.bin_size);
    let mut problems = Vec::new();
    let mut by_bin: BTreeMap<usize, Vec<(&LayoutRect, Rect)>> = BTreeMap::new();

    for entry in &layout.rects {
        let name = entry.name.clone();

        let rect = match entry.rect() {
            Some(rect) => rect,
            None => {
                problems.push(Problem::Malformed { name });
                continue;
            }
        };

        if entry.bin >= layout.bin_count {
            problems.push(Problem::NoSuchBin {
                name,
                bin: entry.bin,
            });
        } else if !bin.contains(&rect) {
            problems.push(Problem::OutOfBounds { name });
        }

        by_bin.entry(entry.bin).or_default().push((entry, rect));
    }

    for rects in by_bin.values() {
        for (i, (first, a)) in rects.iter().enumerate() {
            for (second, b) in &rects[i + 1..] {
                if a.intersects(b) {
                    problems.push(Problem::Overlap {
                        first: first.name.clone(),
                        second: second.name.clone(),
                    });
                }
            }
        }
    }

    problems
}

#[cfg(test)]
mod test {
    use super::*;

    fn entry(name: &str, bin: usize, min: (u32, u32), max: (u32, u32)) -> LayoutRect {
        LayoutRect {
            name: name.to_owned(),
            bin,
            min,
            max,
        }
    }

    fn layout(bin_count: usize, rects: Vec<LayoutRect>) -> Layout {
        Layout {
            name: "test".to_owned(),
            bin_size: (10, 10),
            bin_count,
            allow_rotation: false,
            rects,
        }
    }

    #[test]
    fn clean_layout() {
        let layout = layout(
            2,
            vec![
                entry("a", 0, (0, 0), (5, 10)),
                entry("b", 0, (5, 0), (10, 10)),
                entry("c", 1, (0, 0), (10, 10)),
            ],
        );

        assert!(find_problems(&layout).is_empty());
    }

    #[test]
    fn overlap_within_a_bin() {
        let layout = layout(
            1,
            vec![
                entry("a", 0, (0, 0), (6, 6)),
                entry("b", 0, (5, 5), (10, 10)),
            ],
        );

        assert_eq!(
            find_problems(&layout),
            vec![Problem::Overlap {
                first: "a".to_owned(),
                second: "b".to_owned(),
            }]
        );
    }

    #[test]
    fn degenerate_rect_does_not_overlap() {
        let layout = layout(
            1,
            vec![
                entry("a", 0, (0, 0), (10, 10)),
                entry("line", 0, (5, 0), (5, 10)),
            ],
        );

        assert!(find_problems(&layout).is_empty());
    }

    #[test]
    fn bounds_and_bins() {
        let layout = layout(
            1,
            vec![
                entry("wide", 0, (5, 0), (11, 4)),
                entry("lost", 3, (0, 0), (1, 1)),
                entry("flipped", 0, (4, 4), (2, 8)),
            ],
        );

        assert_eq!(
            find_problems(&layout),
            vec![
                Problem::OutOfBounds {
                    name: "wide".to_owned(),
                },
                Problem::NoSuchBin {
                    name: "lost".to_owned(),
                    bin: 3,
                },
                Problem::Malformed {
                    name: "flipped".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn packed_layouts_verify() {
        use crate::{commands::pack::pack_config, data::RectConfig};

        let config = crate::data::Config {
            name: "generated".to_owned(),
            bin_size: (64, 64),
            allow_rotation: false,
            multi_bin: true,
            grow: false,
            max_bin_size: (64, 64),
            rects: (0..50u32)
                .map(|i| RectConfig {
                    name: format!("r{}", i),
                    size: (i % 9 + 3, (i * 5) % 11 + 2),
                })
                .collect(),
            file_path: Default::default(),
        };

        let layout = pack_config(&config).unwrap();

        assert!(find_problems(&layout).is_empty());
    }
}
