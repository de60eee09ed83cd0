//! Plugin manifest (`plugin.xml`) reader.
//!
//! Only the `name` and `version` attributes of the `<plugin>` element are
//! used; they go into the header of every generated key file.

use std::{fs, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
}

impl PluginInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let xml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read plugin manifest: {}", path.display()))?;
        Self::parse(&xml)
            .with_context(|| format!("Failed to parse plugin manifest: {}", path.display()))
    }

    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        loop {
            match reader.read_event()? {
                Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"plugin" => {
                    return plugin_from_element(e);
                }
                Event::Eof => bail!("No <plugin> element found"),
                _ => {}
            }
        }
    }
}

fn plugin_from_element(e: &BytesStart<'_>) -> Result<PluginInfo> {
    let mut name = None;
    let mut version = None;

    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|err| anyhow!("Invalid attribute: {err}"))?;
        match attr.key.as_ref() {
            b"name" => name = Some(attr.unescape_value()?.to_string()),
            b"version" => version = Some(attr.unescape_value()?.to_string()),
            _ => {}
        }
    }

    Ok(PluginInfo {
        name: name.context("<plugin> is missing the \"name\" attribute")?,
        version: version.context("<plugin> is missing the \"version\" attribute")?,
    })
}
