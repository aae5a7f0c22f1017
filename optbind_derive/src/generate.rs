mod choices;
mod options;
