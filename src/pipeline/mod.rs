// Pipeline — runs every analysis stage in order over one loaded dataset.
//
//   records → subject / topic / type reports → gap join → weak flags
//
// The classifier stage is separate (see `model::evaluate`) because only the
// console report runs it.

pub mod report;
