use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::info;

use crate::error::CutError;
use crate::record::{SolutionRecord, Solutions};
use crate::report::describe;
use crate::search::{self, SearchMode, SearchStats};
use crate::stock::BarStock;

/// What a run of the cutter produced.
#[derive(Debug)]
pub struct CutOutcome {
    pub solutions: Solutions,
    pub stats: SearchStats,
    pub elapsed: Duration,
    /// Number of combinations echoed by the reporter thread.
    pub reported: u64,
}

/// Runs the search on the calling thread while a reporter thread echoes every newly discovered
/// combination as soon as it is found.
pub struct BarCutter {
    stock: BarStock,
    mode: SearchMode,
    output_file_name: Option<PathBuf>,
}

impl BarCutter {
    // Constructor
    pub fn new(stock: BarStock, mode: SearchMode) -> Self {
        Self {
            stock,
            mode,
            output_file_name: None,
        }
    }

    /// Descriptions of the discovered combinations will also be written to this file.
    pub fn set_output_file(&mut self, path: PathBuf) {
        self.output_file_name = Some(path);
    }

    pub fn stock(&self) -> &BarStock {
        &self.stock
    }

    /// Runs the search, echoing discoveries to stdout.
    pub fn cut(&self) -> Result<CutOutcome, CutError> {
        self.cut_to(std::io::stdout())
    }

    /// Runs the search, echoing discoveries to `echo`.
    pub fn cut_to<W: Write + Send + 'static>(&self, echo: W) -> Result<CutOutcome, CutError> {
        self.print();

        let (sender, receiver): (Sender<SolutionRecord>, Receiver<SolutionRecord>) = unbounded();

        // Spawn the IO thread which consumes the discoveries
        let stock = self.stock.clone();
        let of = self.output_file_name.clone();
        let io_handle = thread::spawn(move || Self::io_loop(receiver, echo, of, stock));

        let timer_start = Instant::now();
        // The sender is moved into the search and dropped with it, which closes the channel
        let (solutions, stats) = search::enumerate(&self.stock, self.mode, Some(sender));
        let elapsed = timer_start.elapsed();
        info!("Search time: {:.2?}", elapsed);

        // Join the I/O thread
        let reported = match io_handle.join() {
            Ok(io_res) => io_res?,
            Err(e) => {
                if let Some(panic_msg) = e.downcast_ref::<&str>() {
                    return Err(CutError::ReporterPanicked(panic_msg.to_string()));
                } else if let Some(panic_msg) = e.downcast_ref::<String>() {
                    return Err(CutError::ReporterPanicked(panic_msg.clone()));
                } else {
                    return Err(CutError::ReporterPanicked("unknown panic type".to_string()));
                }
            }
        };

        Ok(CutOutcome {
            solutions,
            stats,
            elapsed,
            reported,
        })
    }

    /// Consumes discoveries, echoes each combination vector and optionally writes its description
    /// to the output file. Returns the number of combinations consumed.
    fn io_loop<W: Write>(
        receiver: Receiver<SolutionRecord>,
        mut echo: W,
        output_file_name: Option<PathBuf>,
        stock: BarStock,
    ) -> Result<u64, std::io::Error> {
        let mut writer = match output_file_name {
            Some(path) => {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&path)?;
                Some(BufWriter::new(file))
            }
            None => None,
        };

        let mut count: u64 = 0;
        for record in receiver.iter() {
            writeln!(echo, "{:?}", record.counts)?;
            if let Some(w) = writer.as_mut() {
                writeln!(w, "{}", describe(&record, &stock))?;
            }
            count += 1;
        }

        // Final flush after the channel is exhausted
        echo.flush()?;
        if let Some(mut w) = writer {
            w.flush()?;
        }

        Ok(count)
    }

    // Debug print function
    fn print(&self) {
        info!("{:<30}{:?}", "Bar lengths:", self.stock.lengths());
        info!("{:<30}{}", "Limit:", self.stock.limit());
        info!("{:<30}{:?}", "Search mode:", self.mode);
        info!("{:<30}{}", "Maximum depth:", self.stock.max_depth());
        info!(
            "{:<30}{}",
            "Output file:",
            match &self.output_file_name {
                Some(p) => p.display().to_string(),
                None => "<none>".to_string(),
            }
        );
    }
}
