pub mod analyze_medicine;
