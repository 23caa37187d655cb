//! Shared fixtures: a small model directory on disk.
//!
//! ```text
//! <tmp>/model_file.xml
//! <tmp>/output/surfaces/{d_,de_}{TopA,TopB}.rxb   (Irap ASCII content)
//! <tmp>/input/welldata/{OP_1,OP_2}.txt           (RMS ASCII wells)
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use horizon_uncertainty::model::ModelLayout;

pub const TOP_A_DEPTH: f64 = 1500.0;
pub const TOP_B_DEPTH: f64 = 1600.0;
pub const ERROR_DEPTH: f64 = 10.0;

pub const MODEL_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model>
  <zone-log-name>Zonelog</zone-log-name>
  <surface>
    <name>TopA</name>
    <top-of-zone>Valysar</top-of-zone>
  </surface>
  <surface>
    <name>TopB</name>
    <top-of-zone>Therys</top-of-zone>
  </surface>
</model>
"#;

/// Deviated well heading east from (1000, 1000), crossing both surfaces.
pub const OP_1: &str = "\
1.0
Unknown
OP_1 1000.0 1000.0
1
Zonelog DISC 1 Valysar 2 Therys
1000.0 1000.0 1400.0 -999
1000.0 1000.0 1500.0 1
1050.0 1000.0 1550.0 1
1100.0 1000.0 1600.0 2
1200.0 1000.0 1650.0 2
";

/// Near-vertical well at (500, 500).
pub const OP_2: &str = "\
1.0
Unknown
OP_2 500.0 500.0
1
Zonelog DISC 1 Valysar 2 Therys
500.0 500.0 1400.0 1
500.0 500.0 1550.0 1
501.0 500.0 1700.0 2
";

/// Irap classic ASCII grid with a constant value, covering 0..2000 in x and y.
pub fn flat_irap(value: f64) -> String {
    let (ncol, nrow, inc) = (41_usize, 41_usize, 50.0);
    let mut text = format!(
        "-996 {nrow} {inc} {inc}\n0.0 2000.0 0.0 2000.0\n{ncol} 0.0 0.0 0.0\n0 0 0 0 0 0 0\n"
    );
    for row in 0..nrow {
        let values: Vec<String> = (0..ncol).map(|_| format!("{value:.1}")).collect();
        text.push_str(&values.join(" "));
        if row + 1 < nrow {
            text.push('\n');
        }
    }
    text.push('\n');
    text
}

pub fn write(path: &Path, content: impl AsRef<[u8]>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Create the full model directory and return it with its layout.
pub fn model_dir() -> (TempDir, ModelLayout) {
    let dir = TempDir::new().unwrap();
    let base = dir.path();

    write(&base.join("model_file.xml"), MODEL_XML);

    let surfaces = base.join("output").join("surfaces");
    write(&surfaces.join("d_TopA.rxb"), flat_irap(TOP_A_DEPTH));
    write(&surfaces.join("d_TopB.rxb"), flat_irap(TOP_B_DEPTH));
    write(&surfaces.join("de_TopA.rxb"), flat_irap(ERROR_DEPTH));
    write(&surfaces.join("de_TopB.rxb"), flat_irap(ERROR_DEPTH));

    let wells = base.join("input").join("welldata");
    write(&wells.join("OP_1.txt"), OP_1);
    write(&wells.join("OP_2.txt"), OP_2);

    let layout = ModelLayout::new(base);
    (dir, layout)
}
