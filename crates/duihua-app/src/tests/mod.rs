mod startup_tests;
