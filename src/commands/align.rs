use crate::aligner::Aligner;
use crate::cli::AlignArgs;
use crate::utils::Result;

pub fn align(args: AlignArgs) -> Result<()> {
    let aligner = Aligner::builder(args.mode)
        .scoring(args.scoring)
        .cigar(!args.no_cigar)
        .target_begin(!args.no_target_begin)
        .print_matrix(args.print_matrix)
        .build();

    log::debug!(
        "Aligning query of length {} against target of length {} in {} mode",
        args.query.len(),
        args.target.len(),
        args.mode
    );
    let alignment = aligner.align(args.query.as_bytes(), args.target.as_bytes())?;

    println!("Query sequence: {}", args.query);
    println!("Target sequence: {}", args.target);
    println!("Alignment score: {}", alignment.score);
    if let Some(cigar) = &alignment.cigar {
        println!("CIGAR string: {}", cigar);
    }
    if let Some(target_begin) = alignment.target_begin {
        println!("Target begin: {}", target_begin);
    }
    Ok(())
}
