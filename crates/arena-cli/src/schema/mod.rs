pub mod training_history;
