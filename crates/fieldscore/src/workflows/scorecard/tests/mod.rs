mod common;

mod journal;
