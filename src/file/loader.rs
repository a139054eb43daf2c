//! YAML file loading functionality.
//!
//! Loads YAML text from a file or stdin and parses it into a [`YamlFile`].
//! Gzip-compressed input is decompressed transparently: files are recognized
//! by a `.gz` extension, stdin by the gzip magic bytes.

use crate::document::parser::{parse_yaml, parse_yaml_named};
use crate::document::tree::YamlFile;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a YAML file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use yamlnav::file::loader::load_yaml_file;
///
/// let file = load_yaml_file("deployment.yaml").unwrap();
/// println!("{} document(s)", file.documents().len());
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or decompressed, or if its
/// contents are not valid YAML.
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<YamlFile> {
    let path_ref = path.as_ref();
    let name = path_ref.display().to_string();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref).with_context(|| format!("Failed to read file {}", name))?
    };
    log::debug!(
        "read {} characters from {}{}",
        content.chars().count(),
        name,
        if is_gzipped { " (gzip)" } else { "" }
    );

    parse_yaml_named(&content, &name)
}

/// Loads and parses YAML from standard input.
///
/// # Errors
///
/// Returns an error if reading stdin fails, if the input is neither UTF-8
/// nor gzip, or if it is not valid YAML.
pub fn load_yaml_from_stdin() -> Result<YamlFile> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    load_yaml_from_bytes(&buffer)
}

/// Parses YAML from raw bytes, decompressing them first if they start with
/// the gzip magic number.
pub fn load_yaml_from_bytes(bytes: &[u8]) -> Result<YamlFile> {
    let content = if bytes.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(bytes)?
    } else {
        String::from_utf8(bytes.to_vec()).context("Invalid UTF-8 in input")?
    };
    parse_yaml(&content).context("Failed to parse YAML input")
}

fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn gzip(content: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(content.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_load_plain_file_remembers_name() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "name: Alice").unwrap();

        let file = load_yaml_file(temp.path()).unwrap();
        assert_eq!(file.document(0).unwrap().scalar_property("name"), Some("Alice"));
        assert_eq!(file.filename(), Some(temp.path().display().to_string().as_str()));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_yaml_file("/definitely/not/here.yaml");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read file"));
    }

    #[test]
    fn test_read_gzipped_file_corrupted() {
        let temp = NamedTempFile::new().unwrap();
        let gz_path = temp.path().with_extension("yaml.gz");
        fs::write(&gz_path, b"not gzip data").unwrap();

        let err = read_gzipped_file(&gz_path).unwrap_err().to_string();
        assert!(err.contains("decompress") || err.contains("corrupted"));
        fs::remove_file(&gz_path).ok();
    }

    #[test]
    fn test_bytes_detect_gzip() {
        let file = load_yaml_from_bytes(&gzip("a: 1\n---\nb: 2\n")).unwrap();
        assert_eq!(file.documents().len(), 2);

        let plain = load_yaml_from_bytes(b"a: 1\n").unwrap();
        assert_eq!(plain.documents().len(), 1);
    }

    #[test]
    fn test_bytes_reject_invalid_utf8() {
        let err = load_yaml_from_bytes(&[0xff, 0xfe, 0x00]).unwrap_err().to_string();
        assert!(err.contains("UTF-8"));
    }
}
