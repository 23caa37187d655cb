//! `model_file.xml` reader
//!
//! ```xml
//! <model>
//!   <zone-log-name>Zonelog</zone-log-name>
//!   <surface>
//!     <name>TopVolantis</name>
//!     <top-of-zone>Valysar</top-of-zone>
//!   </surface>
//! </model>
//! ```
//!
//! Only the elements the viewer needs are extracted; everything else in the
//! file is ignored. Missing elements are reported lazily, when the value is
//! asked for, so a model without `<zone-log-name>` can still list surfaces.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::path::Path;

use super::ModelError;

const SURFACE: &str = "surface";
const NAME: &str = "name";
const TOP_OF_ZONE: &str = "top-of-zone";
const ZONE_LOG_NAME: &str = "zone-log-name";

/// One `<surface>` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSurface {
    pub name: Option<String>,
    pub top_of_zone: Option<String>,
}

/// Parsed contents of `model_file.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelFile {
    pub surfaces: Vec<ModelSurface>,
    pub zone_log_name: Option<String>,
}

impl ModelFile {
    /// Read and parse a model file from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse model file XML.
    pub fn parse(xml: &str) -> Result<Self, ModelError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut model = Self::default();
        let mut stack: Vec<String> = Vec::new();
        let mut current: Option<ModelSurface> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    if name == SURFACE {
                        current = Some(ModelSurface::default());
                    }
                    stack.push(name);
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    if name == SURFACE {
                        model.surfaces.push(ModelSurface::default());
                    } else {
                        model.assign(&name, current.as_mut(), String::new());
                    }
                }
                Ok(Event::Text(t)) => {
                    let text = t
                        .unescape()
                        .map_err(|e| ModelError::Xml(e.to_string()))?
                        .into_owned();
                    if let Some(element) = stack.last() {
                        model.assign(element, current.as_mut(), text);
                    }
                }
                Ok(Event::CData(t)) => {
                    let text = String::from_utf8_lossy(&t.into_inner()).into_owned();
                    if let Some(element) = stack.last() {
                        model.assign(element, current.as_mut(), text);
                    }
                }
                Ok(Event::End(_)) => {
                    if stack.pop().as_deref() == Some(SURFACE) {
                        if let Some(surface) = current.take() {
                            model.surfaces.push(surface);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(ModelError::Xml(format!(
                        "at byte {}: {e}",
                        reader.buffer_position()
                    )))
                }
            }
        }

        Ok(model)
    }

    /// Store text for a recognised element. The first occurrence wins.
    fn assign(&mut self, element: &str, surface: Option<&mut ModelSurface>, text: String) {
        match (element, surface) {
            (NAME, Some(s)) => {
                s.name.get_or_insert(text);
            }
            (TOP_OF_ZONE, Some(s)) => {
                s.top_of_zone.get_or_insert(text);
            }
            (ZONE_LOG_NAME, _) => {
                self.zone_log_name.get_or_insert(text);
            }
            _ => {}
        }
    }

    /// Surface names in file order.
    pub fn surface_names(&self) -> Result<Vec<String>, ModelError> {
        self.surfaces
            .iter()
            .map(|s| {
                s.name
                    .clone()
                    .ok_or_else(|| ModelError::ElementNotFound(format!("{SURFACE}/{NAME}")))
            })
            .collect()
    }

    /// Top-of-zone names in file order, parallel to [`Self::surface_names`].
    pub fn top_of_zone_names(&self) -> Result<Vec<String>, ModelError> {
        self.surfaces
            .iter()
            .map(|s| {
                s.top_of_zone
                    .clone()
                    .ok_or_else(|| ModelError::ElementNotFound(format!("{SURFACE}/{TOP_OF_ZONE}")))
            })
            .collect()
    }

    /// The `<zone-log-name>` value.
    pub fn zone_log_name(&self) -> Result<&str, ModelError> {
        self.zone_log_name
            .as_deref()
            .ok_or_else(|| ModelError::ElementNotFound(ZONE_LOG_NAME.to_string()))
    }
}
