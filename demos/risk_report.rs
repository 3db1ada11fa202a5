use pif::metrics::engine::entropy::conditional_entropy_table;
use pif::metrics::row_information_gains;
use pif::{
    AccuracyTable, PifError, PriorTable, Table, Value, compute_cigs, compute_csfs, compute_pif,
    compute_weighted_cigs,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), PifError> {
    env_logger::init();

    // A small survey extract: age band, postcode prefix, smoker flag
    let table = Table::new(
        vec!["age", "postcode", "smoker"],
        vec![
            vec![Value::from("30-39"), Value::from("AB1"), Value::from(false)],
            vec![Value::from("30-39"), Value::from("AB1"), Value::from(true)],
            vec![Value::from("40-49"), Value::from("AB1"), Value::from(false)],
            vec![Value::from("40-49"), Value::from("CD2"), Value::from(false)],
            vec![Value::from("50-59"), Value::from("CD2"), Value::from(true)],
            vec![Value::from("30-39"), Value::from("CD2"), Value::from(false)],
            vec![Value::from("40-49"), Value::from("AB1"), Value::from(false)],
            vec![Value::from("70-79"), Value::from("EF3"), Value::from(true)],
        ],
    )?;

    // The attacker believes a third of the population smokes and is right 90% of the time
    let mut priors = PriorTable::new();
    priors.insert(2, [(Value::from(true), 1.0 / 3.0), (Value::from(false), 2.0 / 3.0)].into_iter().collect());
    let mut accuracies = AccuracyTable::new();
    accuracies.insert(2, 0.9);

    let mut rng = StdRng::seed_from_u64(7);
    let cigs = compute_cigs(&table, &priors, &accuracies, None, &mut rng)?;
    let weighted = compute_weighted_cigs(&table, &priors, &accuracies)?;
    let csfs = compute_csfs(&table, &priors, &accuracies)?;

    println!("Columns: {:?}", table.columns());
    println!("Cell information gain:\n{:.3}", cigs.values());
    println!("Weighted cell information gain:\n{:.2}", weighted.values());
    println!("Cell surprise factor:\n{:.3}", csfs.values());
    println!("Row information gain: {:.3}", row_information_gains(&cigs));

    for row in conditional_entropy_table(&table, 2)? {
        println!("H({} | {:?}) = {} of H = {}", row.x, row.y, row.h_x_given_y, row.h_x);
    }

    for percentile in [50.0, 95.0, 100.0] {
        println!("PIF {percentile}: {:.3}", compute_pif(&cigs, percentile)?);
    }

    // A sampled run only visits some features; the rest come back as NaN
    let sampled = compute_cigs(&table, &priors, &accuracies, Some(2), &mut rng)?;
    println!("Sampled CIG (2 of 3 features):\n{:.3}", sampled.values());
    println!("Sampled PIF 95: {:.3}", compute_pif(&sampled, 95.0)?);
    Ok(())
}
