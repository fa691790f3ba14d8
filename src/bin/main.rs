fn main() {
  churn::main();
}
