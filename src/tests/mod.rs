mod block;
mod parse;
mod props;
mod report;
