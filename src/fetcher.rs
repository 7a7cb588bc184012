use futures::TryStreamExt;
use reqwest::{Client, Url};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tokio_util::io::StreamReader;
use tracing::{debug, info};

use crate::errors::{FetchError, Result};
use crate::models::FetchReport;

/// Download one listed file into `output_dir`, rewriting each line with a
/// trailing `\n`.
pub async fn fetch_file(
    client: &Client,
    raw_base_url: &str,
    name: &str,
    output_dir: &Path,
) -> Result<FetchReport> {
    validate_name(name)?;
    let url = file_url(raw_base_url, name)?;

    debug!("Fetching {} from: {}", name, url);
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::FetchStatus {
            name: name.to_string(),
            status: response.status().as_u16(),
        });
    }

    let body = response
        .bytes_stream()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e));
    let mut reader = StreamReader::new(Box::pin(body));

    let path = output_dir.join(name);
    let mut writer = BufWriter::new(File::create(&path).await?);
    let (lines, bytes) = copy_lines(&mut reader, &mut writer).await?;
    writer.flush().await?;

    info!("Wrote {} ({} lines) to {}", name, lines, path.display());
    Ok(FetchReport {
        name: name.to_string(),
        path,
        lines,
        bytes,
    })
}

/// Copy `reader` to `writer` line by line, terminating every line with `\n`.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. A final line without a
/// terminator still gets one. Returns the lines and bytes written.
pub async fn copy_lines<R, W>(reader: &mut R, writer: &mut W) -> std::io::Result<(usize, u64)>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    let mut lines = 0;
    let mut bytes = 0u64;

    while reader.read_until(b'\n', &mut line).await? > 0 {
        let mut content = line.strip_suffix(b"\n").unwrap_or(&line[..]);
        content = content.strip_suffix(b"\r").unwrap_or(content);

        for part in content.split(|&b| b == b'\r') {
            writer.write_all(part).await?;
            writer.write_all(b"\n").await?;
            lines += 1;
            bytes += part.len() as u64 + 1;
        }
        line.clear();
    }

    Ok((lines, bytes))
}

/// Reject names that are not a single plain path component.
fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(FetchError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn file_url(raw_base_url: &str, name: &str) -> Result<Url> {
    let invalid = |message: String| FetchError::InvalidUrl {
        url: raw_base_url.to_string(),
        message,
    };

    let mut url = Url::parse(raw_base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be a base URL".to_string()))?
        .pop_if_empty()
        .push(name);
    Ok(url)
}
