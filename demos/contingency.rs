//! Contingency Table Example
//!
//! Builds a contingency table from flood-stage exceedances and reports the
//! categorical skill scores.
//!
//! Run with: cargo run --example contingency

use hydrotools::prelude::*;

fn main() {
    println!("=== Contingency Table Example ===\n");

    let flood_stage = 12.0;
    let observed_stage = [10.2, 12.8, 13.1, 11.0, 9.7, 12.4, 14.0, 11.9];
    let simulated_stage = [10.8, 12.1, 11.7, 12.3, 9.9, 12.9, 13.2, 11.1];

    let observed: Vec<bool> = observed_stage.iter().map(|&s| s >= flood_stage).collect();
    let simulated: Vec<bool> = simulated_stage.iter().map(|&s| s >= flood_stage).collect();

    let keys = ContingencyKeys::new("hits", "false_alarms", "misses", "correct_negatives");
    match compute_contingency_table(&observed, &simulated, &keys) {
        Ok(labeled) => {
            for (label, count) in &labeled {
                println!("{label:>18}: {count}");
            }

            let table = match ContingencyTable::from_mapping(&labeled, &keys) {
                Ok(table) => table,
                Err(e) => {
                    println!("Error reading table: {e}");
                    return;
                }
            };

            let scores = CategoricalScores::from_table(&table);
            println!("\n--- Skill Scores ---\n");
            println!("POD  (probability of detection):       {:.4}", scores.probability_of_detection);
            println!("POFD (probability of false detection): {:.4}", scores.probability_of_false_detection);
            println!("POFA (probability of false alarm):     {:.4}", scores.probability_of_false_alarm);
            println!("TS   (threat score):                   {:.4}", scores.threat_score);
            println!("FBI  (frequency bias):                 {:.4}", scores.frequency_bias);
            println!("PC   (percent correct):                {:.4}", scores.percent_correct);
            println!("a_r  (base chance):                    {:.4}", scores.base_chance);
            println!("ETS  (equitable threat score):         {:.4}", scores.equitable_threat_score);
        }
        Err(e) => println!("Error computing contingency table: {e}"),
    }
}
