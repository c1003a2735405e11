use pmi_bpe::{split_corpus, train_with_sink, ConsoleReporter};

pub fn main() {
    let corpus = "crazy_, hazy_, day_";
    let data = split_corpus(corpus, ",");
    let iterations = 4;
    println!("Training on corpus: {:?}", data);

    let mut console = ConsoleReporter::stdout();
    let outcome =
        train_with_sink(&data, iterations, &mut console).expect("Failed to train merges");
    console
        .final_vocabulary(&outcome.vocabulary)
        .expect("Failed to print vocabulary");

    println!(
        "Completed {} of {} iterations",
        outcome.completed_iterations, outcome.requested_iterations
    );
}
