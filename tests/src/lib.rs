mod dataset;
mod lookup;
