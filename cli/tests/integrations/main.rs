mod convert;
mod run;
