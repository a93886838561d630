use crate::aligner::Aligner;
use crate::cli::MapArgs;
use crate::mapping::{
    map_fragment, stream_fragments_into_channel, MappingParams, MappingResult, TsvWriter,
};
use crate::utils::{read_reference, Result, Sequence, SequenceStats};
use crossbeam_channel::{bounded, Sender};
use rayon::{
    iter::{ParallelBridge, ParallelIterator},
    ThreadPoolBuilder,
};
use std::{sync::Arc, thread, time::Instant};

const CHANNEL_BUFFER_SIZE: usize = 2048;

pub fn map(args: MapArgs) -> Result<()> {
    let start_timer = Instant::now();

    let references = read_reference(&args.reference_path)?;
    if references.is_empty() {
        return Err(format!(
            "Reference contains no sequences: {}",
            args.reference_path.display()
        ));
    }
    let reference_lengths: Vec<usize> = references.iter().map(Sequence::len).collect();
    SequenceStats::from_lengths(&reference_lengths)?.log("Reference");
    let references = Arc::new(references);

    let mut tsv_writer = TsvWriter::new(args.output_path.as_deref())?;

    let (sender_fragment, receiver_fragment) = bounded(CHANNEL_BUFFER_SIZE);
    let fragment_paths = args.fragment_paths.clone();
    let fragment_stream_thread = thread::spawn(move || {
        stream_fragments_into_channel(&fragment_paths, sender_fragment)
    });

    let (sender_result, receiver_result) = bounded::<MappingResult>(CHANNEL_BUFFER_SIZE);
    let writer_thread = thread::spawn(move || -> Result<Vec<usize>> {
        let mut fragment_lengths = Vec::new();
        for result in &receiver_result {
            fragment_lengths.push(result.fragment_len);
            tsv_writer.write(&result)?;
        }
        tsv_writer.flush()?;
        Ok(fragment_lengths)
    });

    let aligner = Aligner::builder(args.mode)
        .scoring(args.scoring)
        .build();
    let params = MappingParams {
        max_cells: args.max_cells,
    };

    log::debug!(
        "Initializing thread pool with {} threads...",
        args.num_threads
    );
    let pool = initialize_thread_pool(args.num_threads)?;
    pool.install(|| {
        receiver_fragment
            .into_iter()
            .par_bridge()
            .for_each_with(&sender_result, |s, fragment| {
                process_fragment(&fragment, &references, &aligner, &params, s)
            });
    });

    // Clean-up
    drop(sender_result);
    let fragment_lengths = writer_thread
        .join()
        .map_err(|_| "Writer thread panicked".to_string())??;
    log::trace!("Writer thread finished");
    fragment_stream_thread
        .join()
        .map_err(|_| "Fragment stream thread panicked".to_string())?
        .map_err(|e| format!("Fragment streaming failed: {}", e))?;
    log::trace!("Fragment stream thread finished");

    match SequenceStats::from_lengths(&fragment_lengths) {
        Ok(stats) => stats.log("Fragment"),
        Err(_) => log::warn!("No fragments were mapped"),
    }
    log::info!("Total execution time: {:.2?}", start_timer.elapsed());
    Ok(())
}

fn process_fragment(
    fragment: &Sequence,
    references: &Arc<Vec<Sequence>>,
    aligner: &Aligner,
    params: &MappingParams,
    sender_result: &Sender<MappingResult>,
) {
    match map_fragment(fragment, references, aligner, params) {
        Ok(result) => {
            if let Err(e) = sender_result.send(result) {
                log::error!("Failed to send fragment result to writer thread: {}", e);
            }
        }
        Err(err) => {
            log::error!("Error mapping fragment {}: {}", fragment.name, err);
        }
    }
}

fn initialize_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("ivory-{}", i))
        .start_handler(|_thread_index| {
            log::trace!("Initialized thread {:?}", std::thread::current().id());
        })
        .build()
        .map_err(|e| format!("Failed to initialize thread pool: {}", e))
}
