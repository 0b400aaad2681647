use crate::error::{ProcessingError, Result};
use crate::models::{DailyRecord, HourlyRecord};
use crate::readers::RecordLoader;
use memmap2::Mmap;
use std::borrow::Cow;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Reads the daily and hourly files concurrently and hands their decoded
/// text to a [`RecordLoader`].
pub struct ConcurrentReader {
    loader: Arc<RecordLoader>,
    use_mmap: bool,
}

impl ConcurrentReader {
    pub fn new(loader: RecordLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            use_mmap: false,
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Load both datasets. Either failure aborts the whole read.
    pub async fn read_datasets(
        &self,
        day_path: &Path,
        hour_path: &Path,
    ) -> Result<(Vec<DailyRecord>, Vec<HourlyRecord>)> {
        let use_mmap = self.use_mmap;

        let loader = self.loader.clone();
        let path: PathBuf = day_path.to_path_buf();
        let day_handle: JoinHandle<Result<Vec<DailyRecord>>> =
            tokio::task::spawn_blocking(move || {
                let bytes = read_bytes(&path, use_mmap)?;
                let text = decode_input(&bytes, &path)?;
                loader.load_daily(text.as_bytes())
            });

        let loader = self.loader.clone();
        let path: PathBuf = hour_path.to_path_buf();
        let hour_handle: JoinHandle<Result<Vec<HourlyRecord>>> =
            tokio::task::spawn_blocking(move || {
                let bytes = read_bytes(&path, use_mmap)?;
                let text = decode_input(&bytes, &path)?;
                loader.load_hourly(text.as_bytes())
            });

        let (daily, hourly) = tokio::try_join!(day_handle, hour_handle)?;
        Ok((daily?, hourly?))
    }
}

/// Raw file contents, either memory-mapped or read into a buffer.
enum FileBytes {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileBytes::Mapped(mmap) => &mmap[..],
            FileBytes::Buffered(buf) => &buf[..],
        }
    }
}

fn read_bytes(path: &Path, use_mmap: bool) -> Result<FileBytes> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    debug!(path = %path.display(), bytes = len, use_mmap, "Reading input file");

    // Zero-length files cannot be mapped on every platform
    if use_mmap && len > 0 {
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(FileBytes::Mapped(mmap))
    } else {
        let mut buf = Vec::with_capacity(len as usize);
        file.read_to_end(&mut buf)?;
        Ok(FileBytes::Buffered(buf))
    }
}

/// Decode UTF-8 input, dropping a leading byte-order mark if present.
pub fn decode_input<'a>(bytes: &'a [u8], origin: &Path) -> Result<Cow<'a, str>> {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(ProcessingError::InvalidFormat(format!(
            "{} is not valid UTF-8",
            origin.display()
        )));
    }
    Ok(text)
}
